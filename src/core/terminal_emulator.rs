// (C) 2025 - Enzo Lombardi

//! ECMA-48/VT100/VT102/xterm terminal emulation over a private [`TermScreen`].
//!
//! This is the state machine behind the embedded terminal view: it consumes a raw byte stream
//! from a child process or remote shell, interprets C0 controls, ESC sequences, CSI sequences,
//! OSC strings and DCS sixel graphics, and mutates its own screen rather than the widget-tree
//! compositor's. Keyboard/mouse events flowing the other way are re-encoded into the xterm
//! byte sequences a real terminal program expects to read from its input.
//!
//! No crate in the example pack parses ANSI/VT streams as a state machine — [`crate::core::ansi`]
//! only walks SGR codes in static art files — so the parser below is hand-written.

use super::event::{Event, EventType, MouseEvent};
use super::palette::TvColor;
use super::term_cell::{PixelTile, TermCell, TermCellFlags, TermColor};
use super::term_screen::{CursorShape, TermScreen};

/// Parser state per the ECMA-48 / DEC STD 070 table, trimmed to the states this emulator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Ground,
    Escape,
    /// Saw `ESC (`/`)`/`*`/`+`; waiting for the charset final byte (SCS).
    CharsetFinal,
    /// Saw `ESC #`; waiting for the final byte (only `8`, DECALN, is recognized).
    HashFinal,
    CsiEntry,
    CsiIntermediate,
    OscString,
    DcsEntry,
    DcsSixel,
    SosPmApcString,
}

/// Character set designatable into G0..G3 via SCS (`ESC ( / ) / * / + <final>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharSet {
    Ascii,
    /// DEC Special Graphics (VT100 line-drawing set, designated with final byte `0`).
    DecSpecialGraphics,
}

impl CharSet {
    fn from_final_byte(byte: u8) -> Self {
        match byte {
            b'0' => CharSet::DecSpecialGraphics,
            _ => CharSet::Ascii,
        }
    }

    /// Remaps a byte through this charset's glyph table. Only `DecSpecialGraphics` remaps
    /// anything; every other charset this emulator recognizes is ASCII-transparent.
    fn translate(self, ch: char) -> char {
        match self {
            CharSet::Ascii => ch,
            CharSet::DecSpecialGraphics => dec_special_graphics(ch),
        }
    }
}

/// VT100 DEC Special Graphics mapping for the printable ASCII range it redefines (`0x60..=0x7E`).
fn dec_special_graphics(ch: char) -> char {
    match ch {
        '`' => '\u{25C6}', // diamond
        'a' => '\u{2592}', // checkerboard
        'b' => '\u{2409}', // HT symbol
        'c' => '\u{240C}', // FF symbol
        'd' => '\u{240D}', // CR symbol
        'e' => '\u{240A}', // LF symbol
        'f' => '\u{00B0}', // degree
        'g' => '\u{00B1}', // plus/minus
        'h' => '\u{2424}', // NL symbol
        'i' => '\u{240B}', // VT symbol
        'j' => '\u{2518}', // bottom-right corner
        'k' => '\u{2510}', // top-right corner
        'l' => '\u{250C}', // top-left corner
        'm' => '\u{2514}', // bottom-left corner
        'n' => '\u{253C}', // cross
        'o' => '\u{23BA}', // scan line 1
        'p' => '\u{23BB}', // scan line 3
        'q' => '\u{2500}', // horizontal line
        'r' => '\u{23BC}', // scan line 7
        's' => '\u{23BD}', // scan line 9
        't' => '\u{251C}', // left tee
        'u' => '\u{2524}', // right tee
        'v' => '\u{2534}', // bottom tee
        'w' => '\u{252C}', // top tee
        'x' => '\u{2502}', // vertical line
        'y' => '\u{2264}', // less-or-equal
        'z' => '\u{2265}', // greater-or-equal
        '{' => '\u{03C0}', // pi
        '|' => '\u{2260}', // not-equal
        '}' => '\u{00A3}', // pound sterling
        '~' => '\u{00B7}', // middle dot
        _ => ch,
    }
}

/// Mouse reporting protocol selected via DECSET 1000/1002/1003.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MouseProtocol {
    Off,
    /// 1000: button press/release only.
    Normal,
    /// 1002: normal plus motion while a button is held.
    ButtonEvent,
    /// 1003: all motion, button held or not.
    AnyEvent,
}

/// Mouse coordinate encoding selected via DECSET 1005/1006.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MouseEncoding {
    /// X10: coordinates as `byte - 1 + 32`, breaks past column/row 223.
    X10,
    /// 1005: UTF-8 encoded coordinates.
    Utf8,
    /// 1006: SGR encoding, `CSI < b ; x ; y M/m`, no coordinate ceiling.
    Sgr,
}

/// Side effects the caller needs to act on, returned from [`TerminalEmulator::feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorEvent {
    TitleChanged(String),
    IconNameChanged(String),
    Bell,
    /// OSC 52 clipboard write, already base64-decoded.
    ClipboardSet(String),
    EnteredAlternateScreen,
    LeftAlternateScreen,
    /// Bytes the caller must write back to the pty/socket this emulator is reading from — e.g.
    /// a DA/DA2/DSR reply. The emulator has no channel of its own back to the backend.
    ReplyBytes(Vec<u8>),
}

/// A stateful VT100/xterm interpreter driving a private [`TermScreen`].
pub struct TerminalEmulator {
    screen: TermScreen,
    state: ParserState,
    params: Vec<u16>,
    collecting_param: bool,
    intermediates: Vec<u8>,
    private_marker: Option<u8>,
    osc_buffer: String,
    utf8_pending: Vec<u8>,
    cur_fg: TermColor,
    cur_bg: TermColor,
    cur_flags: TermCellFlags,
    autowrap: bool,
    pending_wrap: bool,
    origin_mode: bool,
    saved_cursor: Option<(u16, u16)>,
    mouse_protocol: MouseProtocol,
    mouse_encoding: MouseEncoding,
    bracketed_paste: bool,
    application_cursor_keys: bool,
    application_keypad: bool,
    title: String,
    /// Columns with a tab stop set, indexed by column. Reset to every-8th column on resize/RIS.
    tab_stops: Vec<bool>,
    charsets: [CharSet; 4],
    /// Which of `charsets` is currently invoked into GL (selected by LS0/LS1/LS2/LS3).
    gl: usize,
    /// Single-shift override for the next printable character only (SS2/SS3).
    single_shift: Option<usize>,
    /// Pending SCS target (which of G0..G3 the next byte designates), set when entering
    /// [`ParserState::CharsetFinal`].
    charset_target: usize,
    /// 256-color palette overrides from OSC 4; indices left untouched render via the default
    /// [`crate::core::palette`] mapping.
    palette_overrides: std::collections::HashMap<u8, (u8, u8, u8)>,
    sixel_tile: Option<PixelTile>,
    sixel_color_palette: Vec<(u8, u8, u8)>,
    sixel_cursor: (u16, u16),
    sixel_color: usize,
    /// Numeric params accumulated for a `#Pc[;Pu;Px;Py;Pz]` color-select/define command.
    sixel_color_params: Vec<u32>,
    sixel_parsing_color_cmd: bool,
}

const SIXEL_MAX_COLORS: usize = 256;

impl TerminalEmulator {
    pub fn new(rows: u16, cols: u16, scrollback_cap: usize) -> Self {
        Self {
            screen: TermScreen::new(rows, cols, scrollback_cap),
            state: ParserState::Ground,
            params: Vec::new(),
            collecting_param: false,
            intermediates: Vec::new(),
            private_marker: None,
            osc_buffer: String::new(),
            utf8_pending: Vec::new(),
            cur_fg: TermColor::Default,
            cur_bg: TermColor::Default,
            cur_flags: TermCellFlags::empty(),
            autowrap: true,
            pending_wrap: false,
            origin_mode: false,
            saved_cursor: None,
            mouse_protocol: MouseProtocol::Off,
            mouse_encoding: MouseEncoding::X10,
            bracketed_paste: false,
            application_cursor_keys: false,
            application_keypad: false,
            title: String::new(),
            tab_stops: default_tab_stops(cols),
            charsets: [CharSet::Ascii; 4],
            gl: 0,
            single_shift: None,
            charset_target: 0,
            palette_overrides: std::collections::HashMap::new(),
            sixel_tile: None,
            sixel_color_palette: default_sixel_palette(),
            sixel_cursor: (0, 0),
            sixel_color: 0,
            sixel_color_params: Vec::new(),
            sixel_parsing_color_cmd: false,
        }
    }

    pub fn screen(&self) -> &TermScreen {
        &self.screen
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bracketed_paste(&self) -> bool {
        self.bracketed_paste
    }

    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.screen.resize(rows, cols);
        self.tab_stops = resize_tab_stops(&self.tab_stops, cols);
    }

    /// Looks up an OSC 4 palette override for an 8-bit indexed color, if one was set.
    pub fn palette_override(&self, index: u8) -> Option<(u8, u8, u8)> {
        self.palette_overrides.get(&index).copied()
    }

    /// Feeds raw bytes from the child process/remote shell into the parser, mutating the
    /// private screen and returning any side effects the caller must act on (title changes,
    /// bell, clipboard writes).
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<EmulatorEvent> {
        let mut out = Vec::new();
        for &byte in bytes {
            self.process_byte(byte, &mut out);
        }
        out
    }

    fn process_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        // C0 controls are always single bytes; UTF-8 continuation/lead bytes are all >= 0x80,
        // so there is never ambiguity between the two.
        if byte < 0x80 && self.utf8_pending.is_empty() {
            self.dispatch_byte(byte, out);
            return;
        }
        if byte < 0x80 {
            // A C0 control arriving mid-sequence aborts whatever malformed UTF-8 we were
            // collecting; real terminals do the same (replacement char, then handle control).
            self.utf8_pending.clear();
            self.dispatch_byte(byte, out);
            return;
        }
        self.utf8_pending.push(byte);
        match std::str::from_utf8(&self.utf8_pending) {
            Ok(s) => {
                let ch = s.chars().next().unwrap();
                self.utf8_pending.clear();
                self.dispatch_char(ch);
            }
            Err(e) if e.error_len().is_some() => {
                self.utf8_pending.clear();
                self.dispatch_char('\u{FFFD}');
            }
            Err(_) => {
                // Incomplete sequence, wait for more bytes.
            }
        }
    }

    fn dispatch_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match self.state {
            ParserState::Ground => self.ground_byte(byte, out),
            ParserState::Escape => self.escape_byte(byte, out),
            ParserState::CharsetFinal => self.charset_final_byte(byte),
            ParserState::HashFinal => self.hash_final_byte(byte),
            ParserState::CsiEntry | ParserState::CsiIntermediate => self.csi_byte(byte, out),
            ParserState::OscString => self.osc_byte(byte, out),
            ParserState::DcsEntry => self.dcs_entry_byte(byte, out),
            ParserState::DcsSixel => self.sixel_byte(byte),
            ParserState::SosPmApcString => {
                if byte == 0x07 || (byte == 0x5C && self.intermediates.last() == Some(&0x1B)) {
                    self.state = ParserState::Ground;
                } else {
                    self.intermediates.push(byte);
                }
            }
        }
    }

    fn dispatch_char(&mut self, ch: char) {
        match self.state {
            ParserState::Ground => self.put_char(ch),
            ParserState::OscString => self.osc_buffer.push(ch),
            ParserState::SosPmApcString => {}
            _ => {}
        }
    }

    fn ground_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match byte {
            0x1B => {
                self.state = ParserState::Escape;
            }
            0x07 => out.push(EmulatorEvent::Bell),
            0x08 => self.move_cursor_rel(0, -1),
            0x09 => self.tab(),
            0x0A | 0x0B | 0x0C => self.line_feed(),
            0x0D => {
                self.screen.cursor.col = 0;
                self.pending_wrap = false;
            }
            0x0E => self.gl = 1, // SO (LS1): invoke G1 into GL
            0x0F => self.gl = 0, // SI (LS0): invoke G0 into GL
            0x20..=0x7E => self.put_char(byte as char),
            _ => {}
        }
    }

    fn escape_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match byte {
            b'[' => {
                self.params.clear();
                self.collecting_param = false;
                self.intermediates.clear();
                self.private_marker = None;
                self.state = ParserState::CsiEntry;
            }
            b']' => {
                self.osc_buffer.clear();
                self.state = ParserState::OscString;
            }
            b'P' => {
                self.params.clear();
                self.intermediates.clear();
                self.state = ParserState::DcsEntry;
            }
            b'X' | b'^' | b'_' => {
                self.intermediates.clear();
                self.state = ParserState::SosPmApcString;
            }
            b'D' => {
                self.line_feed();
                self.state = ParserState::Ground;
            }
            b'E' => {
                self.screen.cursor.col = 0;
                self.line_feed();
                self.state = ParserState::Ground;
            }
            b'M' => {
                self.reverse_line_feed();
                self.state = ParserState::Ground;
            }
            b'7' => {
                self.saved_cursor = Some((self.screen.cursor.row, self.screen.cursor.col));
                self.state = ParserState::Ground;
            }
            b'8' => {
                if let Some((row, col)) = self.saved_cursor {
                    self.screen.cursor.row = row;
                    self.screen.cursor.col = col;
                }
                self.state = ParserState::Ground;
            }
            b'c' => {
                self.reset_to_initial_state();
            }
            b'H' => {
                // HTS: set a tab stop at the current column.
                if let Some(stop) = self.tab_stops.get_mut(self.screen.cursor.col as usize) {
                    *stop = true;
                }
                self.state = ParserState::Ground;
            }
            b'(' => {
                self.charset_target = 0;
                self.state = ParserState::CharsetFinal;
            }
            b')' => {
                self.charset_target = 1;
                self.state = ParserState::CharsetFinal;
            }
            b'*' => {
                self.charset_target = 2;
                self.state = ParserState::CharsetFinal;
            }
            b'+' => {
                self.charset_target = 3;
                self.state = ParserState::CharsetFinal;
            }
            b'n' => {
                // LS2: invoke G2 into GL.
                self.gl = 2;
                self.state = ParserState::Ground;
            }
            b'o' => {
                // LS3: invoke G3 into GL.
                self.gl = 3;
                self.state = ParserState::Ground;
            }
            b'N' => {
                // SS2: next character only comes from G2.
                self.single_shift = Some(2);
                self.state = ParserState::Ground;
            }
            b'O' => {
                // SS3: next character only comes from G3.
                self.single_shift = Some(3);
                self.state = ParserState::Ground;
            }
            b'#' => {
                self.state = ParserState::HashFinal;
            }
            _ => {
                log::debug!("terminal_emulator: unhandled escape final {:?}", byte as char);
                self.state = ParserState::Ground;
            }
        }
    }

    fn charset_final_byte(&mut self, byte: u8) {
        if let Some(slot) = self.charsets.get_mut(self.charset_target) {
            *slot = CharSet::from_final_byte(byte);
        }
        self.state = ParserState::Ground;
    }

    fn hash_final_byte(&mut self, byte: u8) {
        if byte == b'8' {
            self.decaln();
        }
        self.state = ParserState::Ground;
    }

    /// DECALN: fills the screen with `E` for alignment testing. Cursor position is unchanged.
    fn decaln(&mut self) {
        let rows = self.screen.rows();
        let cols = self.screen.cols();
        for r in 0..rows {
            for c in 0..cols {
                self.screen.put(r, c, TermCell::with_char('E', TermColor::Default, TermColor::Default, TermCellFlags::empty()));
            }
        }
    }

    /// RIS (`ESC c`): full terminal reset. Screen contents, scrollback and the alternate-screen
    /// flag are cleared; the scrollback capacity itself is a configuration value and survives.
    fn reset_to_initial_state(&mut self) {
        let (rows, cols) = (self.screen.rows(), self.screen.cols());
        self.screen = TermScreen::new(rows, cols, self.screen.scrollback_cap());
        self.state = ParserState::Ground;
        self.params.clear();
        self.collecting_param = false;
        self.intermediates.clear();
        self.private_marker = None;
        self.cur_fg = TermColor::Default;
        self.cur_bg = TermColor::Default;
        self.cur_flags = TermCellFlags::empty();
        self.autowrap = true;
        self.pending_wrap = false;
        self.origin_mode = false;
        self.saved_cursor = None;
        self.mouse_protocol = MouseProtocol::Off;
        self.mouse_encoding = MouseEncoding::X10;
        self.bracketed_paste = false;
        self.application_cursor_keys = false;
        self.application_keypad = false;
        self.tab_stops = default_tab_stops(self.screen.cols());
        self.charsets = [CharSet::Ascii; 4];
        self.gl = 0;
        self.single_shift = None;
    }

    fn csi_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match byte {
            b'0'..=b'9' => {
                let digit = (byte - b'0') as u16;
                if !self.collecting_param {
                    self.params.push(0);
                    self.collecting_param = true;
                }
                let last = self.params.last_mut().unwrap();
                *last = last.saturating_mul(10).saturating_add(digit);
            }
            b';' => {
                self.params.push(0);
                self.collecting_param = false;
            }
            b'?' | b'>' | b'=' => {
                self.private_marker = Some(byte);
            }
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = ParserState::CsiIntermediate;
            }
            0x40..=0x7E => {
                if self.params.is_empty() {
                    self.params.push(0);
                }
                self.handle_csi(byte, out);
                self.state = ParserState::Ground;
            }
            _ => {
                self.state = ParserState::Ground;
            }
        }
    }

    fn osc_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match byte {
            0x07 => {
                self.handle_osc(out);
                self.state = ParserState::Ground;
            }
            0x1B => {
                // Might be ST (ESC \); peek handled by treating the next byte specially.
                self.intermediates.clear();
                self.intermediates.push(0x1B);
            }
            b'\\' if self.intermediates.last() == Some(&0x1B) => {
                self.handle_osc(out);
                self.intermediates.clear();
                self.state = ParserState::Ground;
            }
            _ => {
                self.intermediates.clear();
                self.osc_buffer.push(byte as char);
            }
        }
    }

    fn dcs_entry_byte(&mut self, byte: u8, out: &mut Vec<EmulatorEvent>) {
        match byte {
            b'0'..=b'9' => {
                if !self.collecting_param {
                    self.params.push(0);
                    self.collecting_param = true;
                }
                let last = self.params.last_mut().unwrap();
                *last = last.saturating_mul(10).saturating_add((byte - b'0') as u16);
            }
            b';' => {
                self.params.push(0);
                self.collecting_param = false;
            }
            b'q' => {
                self.begin_sixel();
                self.state = ParserState::DcsSixel;
            }
            0x1B => {
                // Unsupported DCS payload, swallow until ST.
                self.state = ParserState::Ground;
            }
            _ => {}
        }
        let _ = out;
    }

    fn sixel_byte(&mut self, byte: u8) {
        match byte {
            0x1B => {
                self.flush_sixel_color_cmd();
                self.end_sixel();
                self.state = ParserState::Ground;
            }
            b'"' => {
                // Raster attributes Pan;Pad;Ph;Pv -- this emulator infers the tile's pixel
                // dimensions from the drawn extent instead of honoring the declared size.
                self.flush_sixel_color_cmd();
            }
            b'#' => {
                self.flush_sixel_color_cmd();
                self.sixel_parsing_color_cmd = true;
                self.sixel_color_params.push(0);
            }
            b';' if self.sixel_parsing_color_cmd => {
                self.sixel_color_params.push(0);
            }
            b'0'..=b'9' if self.sixel_parsing_color_cmd => {
                let digit = (byte - b'0') as u32;
                let last = self.sixel_color_params.last_mut().unwrap();
                *last = last.saturating_mul(10).saturating_add(digit);
            }
            b'$' => {
                self.flush_sixel_color_cmd();
                self.sixel_cursor.0 = 0;
            }
            b'-' => {
                self.flush_sixel_color_cmd();
                self.sixel_cursor.0 = 0;
                self.sixel_cursor.1 += 6;
            }
            0x3F..=0x7E => {
                self.flush_sixel_color_cmd();
                self.sixel_pixel_band(byte - 0x3F);
            }
            _ => {}
        }
    }

    /// Applies a pending `#Pc[;Pu;Px;Py;Pz]` command once its terminator (any non-digit,
    /// non-`;` byte) is seen. `Pc` alone selects a palette entry; the 5-param form redefines
    /// it, with `Pu=2` meaning RGB given as percentages of 255.
    fn flush_sixel_color_cmd(&mut self) {
        if !self.sixel_parsing_color_cmd {
            return;
        }
        self.sixel_parsing_color_cmd = false;
        let params = std::mem::take(&mut self.sixel_color_params);
        let Some(&index) = params.first() else { return };
        self.sixel_color = index as usize % SIXEL_MAX_COLORS;
        if params.len() >= 5 && params[1] == 2 {
            let scale = |pct: u32| ((pct.min(100) * 255) / 100) as u8;
            let (r, g, b) = (scale(params[2]), scale(params[3]), scale(params[4]));
            if let Some(slot) = self.sixel_color_palette.get_mut(self.sixel_color) {
                *slot = (r, g, b);
            }
        }
    }

    fn begin_sixel(&mut self) {
        self.sixel_tile = Some(PixelTile::new(1, 1));
        self.sixel_cursor = (0, 0);
        self.sixel_color = 0;
        self.sixel_color_params.clear();
        self.sixel_parsing_color_cmd = false;
    }

    fn sixel_pixel_band(&mut self, bits: u8) {
        let (x, y0) = self.sixel_cursor;
        let color = self.sixel_color_palette.get(self.sixel_color).copied().unwrap_or((255, 255, 255));
        if let Some(tile) = &mut self.sixel_tile {
            let needed_w = x as u32 + 1;
            let needed_h = y0 as u32 + 6;
            if needed_w > tile.width as u32 || needed_h > tile.height as u32 {
                grow_tile(tile, needed_w as u16, needed_h as u16);
            }
            for bit in 0..6u8 {
                if bits & (1 << bit) != 0 {
                    set_pixel(tile, x, y0 + u16::from(bit), color);
                }
            }
        }
        self.sixel_cursor.0 += 1;
    }

    fn end_sixel(&mut self) {
        if let Some(tile) = self.sixel_tile.take() {
            let row = self.screen.cursor.row;
            let col = self.screen.cursor.col;
            self.screen.put(
                row,
                col,
                TermCell {
                    content: super::term_cell::TermCellContent::Tile(tile),
                    fg: self.cur_fg,
                    bg: self.cur_bg,
                    flags: self.cur_flags,
                },
            );
        }
    }

    fn param(&self, i: usize, default: u16) -> u16 {
        match self.params.get(i) {
            Some(&0) | None => default,
            Some(&v) => v,
        }
    }

    fn handle_csi(&mut self, final_byte: u8, out: &mut Vec<EmulatorEvent>) {
        let rows = self.screen.rows();
        let cols = self.screen.cols();
        if self.intermediates == [0x20] && final_byte == b'q' {
            // DECSCUSR: Ps SP q selects the cursor shape.
            self.screen.cursor.shape = match self.param(0, 1) {
                0 | 1 | 2 => CursorShape::Block,
                3 | 4 => CursorShape::Underline,
                5 | 6 => CursorShape::Bar,
                _ => self.screen.cursor.shape,
            };
            self.params.clear();
            self.collecting_param = false;
            self.intermediates.clear();
            return;
        }
        match (self.private_marker, final_byte) {
            (Some(b'?'), b'h') => self.set_private_modes(true, out),
            (Some(b'?'), b'l') => self.set_private_modes(false, out),
            (None, b'A') => self.move_cursor_rel(-(self.param(0, 1) as i32), 0),
            (None, b'B') => self.move_cursor_rel(self.param(0, 1) as i32, 0),
            (None, b'C') => self.move_cursor_rel(0, self.param(0, 1) as i32),
            (None, b'D') => self.move_cursor_rel(0, -(self.param(0, 1) as i32)),
            (None, b'E') => {
                self.screen.cursor.col = 0;
                self.move_cursor_rel(self.param(0, 1) as i32, 0);
            }
            (None, b'F') => {
                self.screen.cursor.col = 0;
                self.move_cursor_rel(-(self.param(0, 1) as i32), 0);
            }
            (None, b'G') => {
                self.screen.cursor.col = (self.param(0, 1) - 1).min(cols.saturating_sub(1));
            }
            (None, b'd') => {
                self.screen.cursor.row = (self.param(0, 1) - 1).min(rows.saturating_sub(1));
            }
            (None, b'H') | (None, b'f') => {
                let origin_row = if self.origin_mode { self.screen.scroll_region.0 } else { 0 };
                let row = origin_row + self.param(0, 1).saturating_sub(1);
                let col = self.param(1, 1).saturating_sub(1);
                self.screen.cursor.row = row.min(rows.saturating_sub(1));
                self.screen.cursor.col = col.min(cols.saturating_sub(1));
                self.pending_wrap = false;
            }
            (None, b'J') => self.erase_in_display(self.param(0, 0)),
            (None, b'K') => self.erase_in_line(self.param(0, 0)),
            (None, b'L') => self.insert_lines(self.param(0, 1)),
            (None, b'M') => self.delete_lines(self.param(0, 1)),
            (None, b'P') => self.delete_chars(self.param(0, 1)),
            (None, b'@') => self.insert_chars(self.param(0, 1)),
            (None, b'X') => self.erase_chars(self.param(0, 1)),
            (None, b'S') => self.screen.scroll_up(self.param(0, 1)),
            (None, b'T') => self.screen.scroll_down(self.param(0, 1)),
            (None, b'm') => self.handle_sgr(),
            (None, b'r') => {
                let top = self.param(0, 1).saturating_sub(1);
                let bottom = self.param(1, rows).saturating_sub(1).min(rows.saturating_sub(1));
                self.screen.scroll_region = (top.min(bottom), bottom);
                self.screen.cursor.row = 0;
                self.screen.cursor.col = 0;
            }
            (None, b's') => {
                self.saved_cursor = Some((self.screen.cursor.row, self.screen.cursor.col));
            }
            (None, b'u') => {
                if let Some((row, col)) = self.saved_cursor {
                    self.screen.cursor.row = row;
                    self.screen.cursor.col = col;
                }
            }
            (None, b'n') => {
                // DSR: device status report.
                match self.param(0, 0) {
                    5 => out.push(EmulatorEvent::ReplyBytes(b"\x1b[0n".to_vec())),
                    6 => {
                        let reply = format!("\x1b[{};{}R", self.screen.cursor.row + 1, self.screen.cursor.col + 1);
                        out.push(EmulatorEvent::ReplyBytes(reply.into_bytes()));
                    }
                    _ => {}
                }
            }
            (None, b'c') => {
                // DA (Primary Device Attributes): report as a VT220 with sixel graphics.
                out.push(EmulatorEvent::ReplyBytes(b"\x1b[?62;4c".to_vec()));
            }
            (Some(b'>'), b'c') => {
                // DA2 (Secondary Device Attributes): arbitrary but stable firmware-version triple.
                out.push(EmulatorEvent::ReplyBytes(b"\x1b[>0;1;0c".to_vec()));
            }
            (None, b'g') => {
                // TBC: tab clear. Ps=0 clears the stop at the cursor, Ps=3 clears all.
                match self.param(0, 0) {
                    0 => {
                        if let Some(stop) = self.tab_stops.get_mut(self.screen.cursor.col as usize) {
                            *stop = false;
                        }
                    }
                    3 => self.tab_stops.iter_mut().for_each(|stop| *stop = false),
                    _ => {}
                }
            }
            _ => {
                log::debug!(
                    "terminal_emulator: unhandled CSI final {:?} (private_marker={:?}, params={:?})",
                    final_byte as char,
                    self.private_marker,
                    self.params
                );
            }
        }
        self.params.clear();
        self.collecting_param = false;
        self.intermediates.clear();
    }

    fn set_private_modes(&mut self, enabled: bool, out: &mut Vec<EmulatorEvent>) {
        for i in 0..self.params.len() {
            match self.params[i] {
                7 => self.autowrap = enabled,
                25 => self.screen.cursor.visible = enabled,
                1000 => self.mouse_protocol = if enabled { MouseProtocol::Normal } else { MouseProtocol::Off },
                1002 => self.mouse_protocol = if enabled { MouseProtocol::ButtonEvent } else { MouseProtocol::Off },
                1003 => self.mouse_protocol = if enabled { MouseProtocol::AnyEvent } else { MouseProtocol::Off },
                1005 => self.mouse_encoding = if enabled { MouseEncoding::Utf8 } else { MouseEncoding::X10 },
                1006 => self.mouse_encoding = if enabled { MouseEncoding::Sgr } else { MouseEncoding::X10 },
                1049 => {
                    if enabled {
                        self.screen.enter_alternate_screen();
                        out.push(EmulatorEvent::EnteredAlternateScreen);
                    } else {
                        self.screen.leave_alternate_screen();
                        out.push(EmulatorEvent::LeftAlternateScreen);
                    }
                }
                2004 => self.bracketed_paste = enabled,
                1 => self.application_cursor_keys = enabled,
                6 => self.origin_mode = enabled,
                66 => self.application_keypad = enabled,
                _ => {}
            }
        }
    }

    fn handle_sgr(&mut self) {
        if self.params.is_empty() {
            self.cur_fg = TermColor::Default;
            self.cur_bg = TermColor::Default;
            self.cur_flags = TermCellFlags::empty();
            return;
        }
        let mut i = 0;
        while i < self.params.len() {
            let code = self.params[i];
            match code {
                0 => {
                    self.cur_fg = TermColor::Default;
                    self.cur_bg = TermColor::Default;
                    self.cur_flags = TermCellFlags::empty();
                }
                1 => self.cur_flags.insert(TermCellFlags::BOLD),
                4 => self.cur_flags.insert(TermCellFlags::UNDERLINE),
                5 => self.cur_flags.insert(TermCellFlags::BLINK),
                7 => self.cur_flags.insert(TermCellFlags::REVERSE),
                22 => self.cur_flags.remove(TermCellFlags::BOLD),
                24 => self.cur_flags.remove(TermCellFlags::UNDERLINE),
                25 => self.cur_flags.remove(TermCellFlags::BLINK),
                27 => self.cur_flags.remove(TermCellFlags::REVERSE),
                30..=37 => self.cur_fg = TermColor::Indexed16(ansi_index_to_tv_color((code - 30) as u8)),
                38 => {
                    if let Some((color, advance)) = self.parse_extended_color(i) {
                        self.cur_fg = color;
                        i += advance;
                    }
                }
                39 => self.cur_fg = TermColor::Default,
                40..=47 => self.cur_bg = TermColor::Indexed16(ansi_index_to_tv_color((code - 40) as u8)),
                48 => {
                    if let Some((color, advance)) = self.parse_extended_color(i) {
                        self.cur_bg = color;
                        i += advance;
                    }
                }
                49 => self.cur_bg = TermColor::Default,
                90..=97 => self.cur_fg = TermColor::Indexed16(ansi_bright_index_to_tv_color((code - 90) as u8)),
                100..=107 => self.cur_bg = TermColor::Indexed16(ansi_bright_index_to_tv_color((code - 100) as u8)),
                _ => {}
            }
            i += 1;
        }
    }

    fn parse_extended_color(&self, i: usize) -> Option<(TermColor, usize)> {
        match self.params.get(i + 1) {
            Some(&5) => self.params.get(i + 2).map(|&n| (TermColor::Indexed256(n as u8), 2)),
            Some(&2) => {
                let r = *self.params.get(i + 2)?;
                let g = *self.params.get(i + 3)?;
                let b = *self.params.get(i + 4)?;
                Some((TermColor::Rgb(r as u8, g as u8, b as u8), 4))
            }
            _ => None,
        }
    }

    fn handle_osc(&mut self, out: &mut Vec<EmulatorEvent>) {
        let body = std::mem::take(&mut self.osc_buffer);
        let mut parts = body.splitn(2, ';');
        let code = parts.next().unwrap_or("");
        let arg = parts.next().unwrap_or("");
        match code {
            "0" => out.push(EmulatorEvent::TitleChanged(arg.to_string())),
            "1" => out.push(EmulatorEvent::IconNameChanged(arg.to_string())),
            "2" => out.push(EmulatorEvent::TitleChanged(arg.to_string())),
            "52" => {
                use base64::{engine::general_purpose::STANDARD, Engine as _};
                if let Some(payload) = arg.splitn(2, ';').nth(1) {
                    if let Ok(decoded) = STANDARD.decode(payload) {
                        if let Ok(text) = String::from_utf8(decoded) {
                            out.push(EmulatorEvent::ClipboardSet(text));
                        }
                    }
                }
            }
            "4" => {
                let mut parts = arg.split(';');
                while let (Some(index), Some(spec)) = (parts.next(), parts.next()) {
                    if let (Ok(index), Some(rgb)) = (index.parse::<u8>(), parse_color_spec(spec)) {
                        self.palette_overrides.insert(index, rgb);
                    }
                }
            }
            "1337" => self.handle_iterm_image(arg),
            _ => {
                log::debug!("terminal_emulator: unhandled OSC code {code:?}");
            }
        }
        if let EmulatorEvent::TitleChanged(t) = out.last().cloned().unwrap_or(EmulatorEvent::Bell) {
            self.title = t;
        }
    }

    /// OSC 1337 `File=...:<base64>` (iTerm2 inline image protocol). Placed at the cursor cell
    /// as a raw RGBA [`PixelTile`] when the payload's byte count matches the declared
    /// `width`/`height` hint exactly; this emulator carries no PNG/JPEG decoder, so a
    /// compressed payload is logged and discarded rather than guessed at.
    fn handle_iterm_image(&mut self, arg: &str) {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        let Some((params, b64)) = arg.split_once(':') else {
            log::debug!("terminal_emulator: OSC 1337 payload missing ':' separator, discarding");
            return;
        };
        let mut width = None;
        let mut height = None;
        for kv in params.split(';') {
            let Some((key, value)) = kv.split_once('=') else { continue };
            let value = value.trim_end_matches("px");
            match key {
                "width" => width = value.parse::<u32>().ok(),
                "height" => height = value.parse::<u32>().ok(),
                _ => {}
            }
        }
        let (Some(width), Some(height)) = (width, height) else {
            log::debug!("terminal_emulator: OSC 1337 image missing width/height hints, discarding");
            return;
        };
        let Ok(bytes) = STANDARD.decode(b64) else {
            log::debug!("terminal_emulator: OSC 1337 payload failed base64 decode");
            return;
        };
        if bytes.len() as u64 != u64::from(width) * u64::from(height) * 4 {
            log::debug!(
                "terminal_emulator: OSC 1337 image payload isn't raw RGBA ({} bytes for {}x{}), discarding",
                bytes.len(),
                width,
                height
            );
            return;
        }
        let mut tile = PixelTile::new(width as u16, height as u16);
        tile.rgba.copy_from_slice(&bytes);
        let (row, col) = (self.screen.cursor.row, self.screen.cursor.col);
        self.screen.put(
            row,
            col,
            TermCell {
                content: super::term_cell::TermCellContent::Tile(tile),
                fg: self.cur_fg,
                bg: self.cur_bg,
                flags: self.cur_flags,
            },
        );
    }

    fn put_char(&mut self, ch: char) {
        if self.pending_wrap {
            self.newline_wrap();
        }
        let active = self.single_shift.take().unwrap_or(self.gl);
        let ch = self.charsets[active].translate(ch);
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        let cols = self.screen.cols();
        let (row, col) = (self.screen.cursor.row, self.screen.cursor.col);
        self.screen.put(row, col, TermCell::with_char(ch, self.cur_fg, self.cur_bg, self.cur_flags));
        if width == 2 && col + 1 < cols {
            self.screen.put(row, col + 1, TermCell::make_wide_continuation(self.cur_fg, self.cur_bg));
        }
        let next_col = col + width as u16;
        if next_col >= cols {
            self.screen.cursor.col = cols.saturating_sub(1);
            if self.autowrap {
                self.pending_wrap = true;
            }
        } else {
            self.screen.cursor.col = next_col;
        }
    }

    fn newline_wrap(&mut self) {
        self.pending_wrap = false;
        self.screen.cursor.col = 0;
        self.line_feed();
    }

    fn line_feed(&mut self) {
        let (_, bottom) = self.screen.scroll_region;
        if self.screen.cursor.row == bottom {
            self.screen.scroll_up(1);
        } else if self.screen.cursor.row + 1 < self.screen.rows() {
            self.screen.cursor.row += 1;
        }
    }

    fn reverse_line_feed(&mut self) {
        let (top, _) = self.screen.scroll_region;
        if self.screen.cursor.row == top {
            self.screen.scroll_down(1);
        } else if self.screen.cursor.row > 0 {
            self.screen.cursor.row -= 1;
        }
    }

    fn tab(&mut self) {
        let last = self.screen.cols().saturating_sub(1);
        let next = (self.screen.cursor.col + 1..=last).find(|&c| self.tab_stops.get(c as usize).copied().unwrap_or(false));
        self.screen.cursor.col = next.unwrap_or(last);
    }

    fn move_cursor_rel(&mut self, rows: i32, cols: i32) {
        self.pending_wrap = false;
        let new_row = (self.screen.cursor.row as i32 + rows).clamp(0, self.screen.rows() as i32 - 1);
        let new_col = (self.screen.cursor.col as i32 + cols).clamp(0, self.screen.cols() as i32 - 1);
        self.screen.cursor.row = new_row as u16;
        self.screen.cursor.col = new_col as u16;
    }

    fn erase_in_display(&mut self, mode: u16) {
        let rows = self.screen.rows();
        let cols = self.screen.cols();
        let (cur_row, cur_col) = (self.screen.cursor.row, self.screen.cursor.col);
        match mode {
            0 => {
                self.erase_range(cur_row, cur_col, cur_row, cols.saturating_sub(1));
                for r in cur_row + 1..rows {
                    self.erase_range(r, 0, r, cols.saturating_sub(1));
                }
            }
            1 => {
                for r in 0..cur_row {
                    self.erase_range(r, 0, r, cols.saturating_sub(1));
                }
                self.erase_range(cur_row, 0, cur_row, cur_col);
            }
            _ => self.screen.clear(),
        }
    }

    fn erase_in_line(&mut self, mode: u16) {
        let cols = self.screen.cols();
        let row = self.screen.cursor.row;
        let col = self.screen.cursor.col;
        match mode {
            0 => self.erase_range(row, col, row, cols.saturating_sub(1)),
            1 => self.erase_range(row, 0, row, col),
            _ => self.erase_range(row, 0, row, cols.saturating_sub(1)),
        }
    }

    fn erase_range(&mut self, row: u16, from_col: u16, _row2: u16, to_col: u16) {
        for c in from_col..=to_col {
            self.screen.put(row, c, TermCell::blank());
        }
    }

    fn erase_chars(&mut self, n: u16) {
        let row = self.screen.cursor.row;
        let col = self.screen.cursor.col;
        let end = (col + n).min(self.screen.cols());
        for c in col..end {
            self.screen.put(row, c, TermCell::blank());
        }
    }

    fn insert_chars(&mut self, n: u16) {
        let row = self.screen.cursor.row;
        let cols = self.screen.cols();
        let col = self.screen.cursor.col;
        let mut c = cols;
        while c > col + n {
            c -= 1;
            if let Some(cell) = self.screen.get(row, c - n).cloned() {
                self.screen.put(row, c, cell);
            }
        }
        for c in col..(col + n).min(cols) {
            self.screen.put(row, c, TermCell::blank());
        }
    }

    fn delete_chars(&mut self, n: u16) {
        let row = self.screen.cursor.row;
        let cols = self.screen.cols();
        let col = self.screen.cursor.col;
        for c in col..cols {
            let src = c + n;
            let cell = if src < cols {
                self.screen.get(row, src).cloned().unwrap_or_default()
            } else {
                TermCell::blank()
            };
            self.screen.put(row, c, cell);
        }
    }

    fn insert_lines(&mut self, n: u16) {
        let (top, bottom) = self.screen.scroll_region;
        if self.screen.cursor.row >= top && self.screen.cursor.row <= bottom {
            let saved = self.screen.scroll_region;
            self.screen.scroll_region = (self.screen.cursor.row, bottom);
            self.screen.scroll_down(n);
            self.screen.scroll_region = saved;
        }
    }

    fn delete_lines(&mut self, n: u16) {
        let (top, bottom) = self.screen.scroll_region;
        if self.screen.cursor.row >= top && self.screen.cursor.row <= bottom {
            let saved = self.screen.scroll_region;
            self.screen.scroll_region = (self.screen.cursor.row, bottom);
            self.screen.scroll_up(n);
            self.screen.scroll_region = saved;
        }
    }

    /// Encodes a keyboard [`Event`] as the xterm byte sequence a child process reading this
    /// pty expects, honoring application cursor-key mode (DECCKM).
    pub fn encode_key(&self, event: &Event) -> Vec<u8> {
        if event.what != EventType::Keyboard {
            return Vec::new();
        }
        use super::event::*;
        let code = event.key_code;
        let csi_or_ss3 = |final_byte: u8| -> Vec<u8> {
            if self.application_cursor_keys {
                vec![0x1B, b'O', final_byte]
            } else {
                vec![0x1B, b'[', final_byte]
            }
        };
        match code {
            KB_UP => csi_or_ss3(b'A'),
            KB_DOWN => csi_or_ss3(b'B'),
            KB_RIGHT => csi_or_ss3(b'C'),
            KB_LEFT => csi_or_ss3(b'D'),
            KB_HOME => csi_or_ss3(b'H'),
            KB_END => csi_or_ss3(b'F'),
            KB_ENTER => vec![b'\r'],
            KB_BACKSPACE => vec![0x7F],
            KB_TAB => vec![b'\t'],
            KB_ESC => vec![0x1B],
            KB_PGUP => b"\x1b[5~".to_vec(),
            KB_PGDN => b"\x1b[6~".to_vec(),
            KB_INS => b"\x1b[2~".to_vec(),
            KB_DEL => b"\x1b[3~".to_vec(),
            KB_F1 => b"\x1bOP".to_vec(),
            KB_F2 => b"\x1bOQ".to_vec(),
            KB_F3 => b"\x1bOR".to_vec(),
            KB_F4 => b"\x1bOS".to_vec(),
            KB_F5 => b"\x1b[15~".to_vec(),
            KB_F6 => b"\x1b[17~".to_vec(),
            KB_F7 => b"\x1b[18~".to_vec(),
            KB_F8 => b"\x1b[19~".to_vec(),
            KB_F9 => b"\x1b[20~".to_vec(),
            KB_F10 => b"\x1b[21~".to_vec(),
            KB_F11 => b"\x1b[23~".to_vec(),
            KB_F12 => b"\x1b[24~".to_vec(),
            c if (0x0001..=0x001A).contains(&c) => vec![c as u8],
            c => {
                let low = (c & 0x00FF) as u8;
                if low.is_ascii_graphic() || low == b' ' {
                    vec![low]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Encodes a mouse [`Event`] per the active protocol/encoding, or `None` if mouse reporting
    /// is off or the event doesn't match the active protocol (e.g. motion while
    /// [`MouseProtocol::Normal`] is selected).
    pub fn encode_mouse(&self, event: &Event) -> Option<Vec<u8>> {
        if self.mouse_protocol == MouseProtocol::Off {
            return None;
        }
        let m: &MouseEvent = &event.mouse;
        let button_code: u8 = match event.what {
            EventType::MouseDown => button_bit(m.buttons),
            EventType::MouseUp => 3,
            EventType::MouseMove => {
                if self.mouse_protocol == MouseProtocol::Normal {
                    return None;
                }
                if self.mouse_protocol == MouseProtocol::ButtonEvent && m.buttons == 0 {
                    return None;
                }
                button_bit(m.buttons) | 0x20
            }
            EventType::MouseWheelUp => 0x40,
            EventType::MouseWheelDown => 0x41,
            _ => return None,
        };
        let col = m.pos.x as i32 + 1;
        let row = m.pos.y as i32 + 1;
        Some(match self.mouse_encoding {
            MouseEncoding::Sgr => {
                let final_byte = if event.what == EventType::MouseUp { 'm' } else { 'M' };
                format!("\x1b[<{button_code};{col};{row}{final_byte}").into_bytes()
            }
            MouseEncoding::Utf8 | MouseEncoding::X10 => {
                let mut out = vec![0x1B, b'[', b'M', button_code + 32];
                out.extend(encode_coord(col));
                out.extend(encode_coord(row));
                out
            }
        })
    }
}

fn encode_coord(v: i32) -> Vec<u8> {
    let encoded = (v + 32).clamp(32, 255) as u32;
    char::from_u32(encoded).map(|c| c.to_string().into_bytes()).unwrap_or_else(|| vec![b'?'])
}

fn button_bit(buttons: u8) -> u8 {
    use super::event::{MB_LEFT_BUTTON, MB_MIDDLE_BUTTON, MB_RIGHT_BUTTON};
    if buttons & MB_LEFT_BUTTON != 0 {
        0
    } else if buttons & MB_MIDDLE_BUTTON != 0 {
        1
    } else if buttons & MB_RIGHT_BUTTON != 0 {
        2
    } else {
        3
    }
}

fn ansi_index_to_tv_color(code: u8) -> TvColor {
    match code {
        0 => TvColor::Black,
        1 => TvColor::Red,
        2 => TvColor::Green,
        3 => TvColor::Brown,
        4 => TvColor::Blue,
        5 => TvColor::Magenta,
        6 => TvColor::Cyan,
        _ => TvColor::LightGray,
    }
}

fn ansi_bright_index_to_tv_color(code: u8) -> TvColor {
    match code {
        0 => TvColor::DarkGray,
        1 => TvColor::LightRed,
        2 => TvColor::LightGreen,
        3 => TvColor::Yellow,
        4 => TvColor::LightBlue,
        5 => TvColor::LightMagenta,
        6 => TvColor::LightCyan,
        _ => TvColor::White,
    }
}

/// Parses an X11-style color spec from OSC 4/10/11 (`#rrggbb` or `rgb:rr/gg/bb` with 1-4 hex
/// digits per channel).
fn parse_color_spec(spec: &str) -> Option<(u8, u8, u8)> {
    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some((r, g, b));
        }
        return None;
    }
    let rest = spec.strip_prefix("rgb:")?;
    let mut channels = rest.split('/');
    let scale = |s: &str| -> Option<u8> {
        let value = u32::from_str_radix(s, 16).ok()?;
        let bits = (s.len() as u32) * 4;
        let max = (1u32 << bits) - 1;
        Some(((value * 255) / max) as u8)
    };
    let r = scale(channels.next()?)?;
    let g = scale(channels.next()?)?;
    let b = scale(channels.next()?)?;
    Some((r, g, b))
}

fn default_tab_stops(cols: u16) -> Vec<bool> {
    (0..cols).map(|c| c % 8 == 0).collect()
}

/// Resizes a tab-stop table, preserving existing stops and filling new columns with the
/// every-8th-column default (xterm's behavior on resize).
fn resize_tab_stops(current: &[bool], cols: u16) -> Vec<bool> {
    (0..cols).map(|c| current.get(c as usize).copied().unwrap_or(c % 8 == 0)).collect()
}

fn default_sixel_palette() -> Vec<(u8, u8, u8)> {
    // VT340 default 16-entry ramp; sixel streams normally redefine these with `#Pc;2;r;g;b`.
    let mut palette = Vec::with_capacity(SIXEL_MAX_COLORS);
    palette.push((0, 0, 0));
    palette.push((51, 51, 204));
    palette.push((204, 33, 33));
    palette.push((51, 204, 51));
    palette.push((204, 51, 204));
    palette.push((51, 204, 204));
    palette.push((204, 204, 51));
    palette.push((204, 204, 204));
    while palette.len() < SIXEL_MAX_COLORS {
        palette.push((255, 255, 255));
    }
    palette
}

fn grow_tile(tile: &mut PixelTile, width: u16, height: u16) {
    let mut grown = PixelTile::new(width.max(tile.width), height.max(tile.height));
    for y in 0..tile.height {
        for x in 0..tile.width {
            let src = (y as usize * tile.width as usize + x as usize) * 4;
            let dst = (y as usize * grown.width as usize + x as usize) * 4;
            grown.rgba[dst..dst + 4].copy_from_slice(&tile.rgba[src..src + 4]);
        }
    }
    *tile = grown;
}

fn set_pixel(tile: &mut PixelTile, x: u16, y: u16, color: (u8, u8, u8)) {
    if x >= tile.width || y >= tile.height {
        return;
    }
    let idx = (y as usize * tile.width as usize + x as usize) * 4;
    tile.rgba[idx] = color.0;
    tile.rgba[idx + 1] = color.1;
    tile.rgba[idx + 2] = color.2;
    tile.rgba[idx + 3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::term_cell::TermCellContent;

    #[test]
    fn plain_text_advances_cursor() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"Hi");
        assert_eq!(emu.screen().cursor.col, 2);
        assert_eq!(emu.screen().get(0, 0).unwrap().content, TermCellContent::Char('H'));
    }

    #[test]
    fn carriage_return_and_linefeed() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"ab\r\ncd");
        assert_eq!(emu.screen().cursor.row, 1);
        assert_eq!(emu.screen().get(1, 0).unwrap().content, TermCellContent::Char('c'));
    }

    #[test]
    fn cup_moves_cursor_to_one_based_position() {
        let mut emu = TerminalEmulator::new(10, 10, 100);
        emu.feed(b"\x1b[3;4H");
        assert_eq!(emu.screen().cursor.row, 2);
        assert_eq!(emu.screen().cursor.col, 3);
    }

    #[test]
    fn sgr_sets_indexed_color() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"\x1b[31mX");
        let cell = emu.screen().get(0, 0).unwrap();
        assert_eq!(cell.fg, TermColor::Indexed16(TvColor::Red));
    }

    #[test]
    fn alternate_screen_toggle_emits_events() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        let events = emu.feed(b"\x1b[?1049h");
        assert!(events.contains(&EmulatorEvent::EnteredAlternateScreen));
        assert!(emu.screen().is_alternate());
        let events = emu.feed(b"\x1b[?1049l");
        assert!(events.contains(&EmulatorEvent::LeftAlternateScreen));
        assert!(!emu.screen().is_alternate());
    }

    #[test]
    fn osc_title_is_captured() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        let events = emu.feed(b"\x1b]0;hello\x07");
        assert_eq!(events, vec![EmulatorEvent::TitleChanged("hello".to_string())]);
        assert_eq!(emu.title(), "hello");
    }

    #[test]
    fn encode_key_respects_application_cursor_keys() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        let up = Event::keyboard(super::super::event::KB_UP);
        assert_eq!(emu.encode_key(&up), b"\x1b[A");
        emu.feed(b"\x1b[?1h");
        assert_eq!(emu.encode_key(&up), b"\x1bOA");
    }

    #[test]
    fn encode_mouse_sgr_format() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"\x1b[?1000h\x1b[?1006h");
        let mut ev = Event::mouse(EventType::MouseDown, crate::core::geometry::Point::new(2, 3), super::super::event::MB_LEFT_BUTTON, false);
        ev.what = EventType::MouseDown;
        let encoded = emu.encode_mouse(&ev).unwrap();
        assert_eq!(encoded, b"\x1b[<0;3;4M".to_vec());
    }

    #[test]
    fn dsr_cursor_position_replies_with_current_position() {
        let mut emu = TerminalEmulator::new(10, 10, 100);
        emu.feed(b"\x1b[3;4H");
        let events = emu.feed(b"\x1b[6n");
        assert_eq!(events, vec![EmulatorEvent::ReplyBytes(b"\x1b[3;4R".to_vec())]);
    }

    #[test]
    fn device_attributes_reply() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        let events = emu.feed(b"\x1b[c");
        assert_eq!(events, vec![EmulatorEvent::ReplyBytes(b"\x1b[?62;4c".to_vec())]);
        let events = emu.feed(b"\x1b[>c");
        assert_eq!(events, vec![EmulatorEvent::ReplyBytes(b"\x1b[>0;1;0c".to_vec())]);
    }

    #[test]
    fn decscusr_sets_cursor_shape() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"\x1b[4 q");
        assert_eq!(emu.screen().cursor.shape, CursorShape::Underline);
        emu.feed(b"\x1b[5 q");
        assert_eq!(emu.screen().cursor.shape, CursorShape::Bar);
    }

    #[test]
    fn hts_adds_a_stop_before_the_next_default_one() {
        let mut emu = TerminalEmulator::new(5, 20, 100);
        emu.feed(b"\x1b[4G"); // column 4 (1-based -> col index 3)
        emu.feed(b"\x1bH"); // HTS at column 3
        emu.feed(b"\x1b[1G\t");
        assert_eq!(emu.screen().cursor.col, 3);
    }

    #[test]
    fn tbc_clears_a_default_stop() {
        let mut emu = TerminalEmulator::new(5, 20, 100);
        emu.feed(b"\x1b[9G\x1b[0g"); // column 9 (1-based -> col index 8, a default stop), clear it
        emu.feed(b"\x1b[1G\t");
        assert_eq!(emu.screen().cursor.col, 16); // falls through to the next default stop
    }

    #[test]
    fn decaln_fills_screen_with_e() {
        let mut emu = TerminalEmulator::new(3, 3, 10);
        emu.feed(b"\x1b#8");
        assert_eq!(emu.screen().get(1, 1).unwrap().content, TermCellContent::Char('E'));
    }

    #[test]
    fn scs_designates_dec_special_graphics_into_g0() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"\x1b(0q"); // designate DEC special graphics into G0, then print 'q'
        assert_eq!(emu.screen().get(0, 0).unwrap().content, TermCellContent::Char('\u{2500}'));
    }

    #[test]
    fn osc4_palette_override_is_stored() {
        let mut emu = TerminalEmulator::new(5, 10, 100);
        emu.feed(b"\x1b]4;5;#112233\x07");
        assert_eq!(emu.palette_override(5), Some((0x11, 0x22, 0x33)));
        assert_eq!(emu.palette_override(6), None);
    }
}

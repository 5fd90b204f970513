use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub cursor_bg: Color,    // Highlight for the current instruction and tape cell
    pub bracket: Color,      // Loop brackets
    pub zero_cell: Color,    // Cells holding 0
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    string: Color::Rgb(250, 179, 135),         // Orange for I/O
    number: Color::Rgb(249, 226, 175),         // Yellow for arithmetic
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    cursor_bg: Color::Rgb(245, 194, 231),      // Pink block under the active char/cell
    bracket: Color::Rgb(148, 226, 213),        // Cyan/teal for brackets
    zero_cell: Color::Rgb(88, 91, 112),
};

use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IP_ADDR: Color = Color::Cyan;

pub const GOOD: Color = Color::Green;
pub const FAIR: Color = Color::Yellow;
pub const BAD: Color = Color::Red;

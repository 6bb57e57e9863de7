use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(167, 139, 250);       // #A78BFA - soft violet
pub const ACCENT_DIM: Color = Color::Rgb(127, 104, 200);   // Dimmed violet
pub const SUCCESS: Color = Color::Rgb(134, 188, 111);      // Soft green
pub const WARNING: Color = Color::Rgb(229, 192, 123);      // Warm amber
pub const ERROR: Color = Color::Rgb(224, 108, 117);        // Soft red

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240);         // #f0f0f0 - primary text
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180); // Secondary text
pub const TEXT_MUTED: Color = Color::Rgb(140, 140, 148);   // #8c8c94 - muted text

// Background colors
pub const BG_BASE: Color = Color::Rgb(30, 30, 36);         // #1e1e24 - darkest background
pub const BG_SURFACE: Color = Color::Rgb(42, 42, 50);      // #2a2a32 - content panels
pub const BG_ELEVATED: Color = Color::Rgb(58, 58, 68);     // Elevated elements
pub const BG_INPUT: Color = Color::Rgb(50, 50, 60);        // #32323c - input field

// Border colors
pub const BORDER: Color = Color::Rgb(58, 58, 68);          // Subtle border
pub const BORDER_FOCUS: Color = Color::Rgb(167, 139, 250); // Accent color for focus

// ASCII control codes and helpers for ANSI sequence composition.

/// ESC (escape) control character.
pub const ESC: char = '\x1B';

#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

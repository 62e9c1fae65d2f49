/// An 8-bit truecolor pixel. Alpha isn't carried; every image this crate
/// writes is color type 2.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}
impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a pixel from wider channel values, clamping each into 0..=255.
    pub fn clamped(red: i32, green: i32, blue: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, u8::MAX as i32) as u8;
        Self::new(clamp(red), clamp(green), clamp(blue))
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}
impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

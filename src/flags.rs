/// Typed switches for the FinalCD tool, as a GUI or CLI would collect them.
///
/// `to_options` produces the raw option vector in the tool's expected order. Switches that
/// are off come out as empty strings; [`crate::args::build_args`] drops those.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolFlags {
    /// Write 32-bit output (`/32`).
    pub thirty_two_bit: bool,

    /// Filter switch, passed through verbatim.
    pub filter: Option<String>,

    /// Dither switch, passed through verbatim.
    pub dither: Option<String>,

    /// Output gain (`/x<gain>`, always with a decimal point), left out when exactly `1.0`.
    pub gain: f32,
}

impl Default for ToolFlags {
    fn default() -> Self {
        Self {
            thirty_two_bit: false,
            filter: None,
            dither: None,
            gain: 1.0,
        }
    }
}

impl ToolFlags {
    pub fn to_options(&self) -> Vec<String> {
        let bit_depth = if self.thirty_two_bit {
            "/32".to_owned()
        } else {
            String::new()
        };

        #[allow(clippy::float_cmp)]
        let gain = if self.gain == 1.0 {
            String::new()
        } else {
            // `{:?}` keeps the fraction on whole numbers: `2.0`, not `2`.
            format!("/x{:?}", self.gain)
        };

        vec![
            bit_depth,
            self.filter.clone().unwrap_or_default(),
            self.dither.clone().unwrap_or_default(),
            gain,
        ]
    }
}

use image::ColorType;

/// How samples are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleType {
    FixedPoint,
    FloatingPoint,
}

/// Colour space reported to the tile server.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColourSpace {
    /// Not yet resolved (before the first tile request).
    #[default]
    None,
    Greyscale,
    Srgb,
    CieLab,
}

/// Native sample encoding of one band.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandFormat {
    /// Unsigned 8-bit.
    UChar,
    /// Signed 8-bit.
    Char,
    /// Unsigned 16-bit.
    UShort,
    /// Signed 16-bit.
    Short,
    /// Unsigned 32-bit.
    UInt,
    /// Signed 32-bit.
    Int,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl BandFormat {
    /// Bits per channel and sample type for this encoding.
    pub fn sample_layout(self) -> (u32, SampleType) {
        match self {
            Self::UChar | Self::Char => (8, SampleType::FixedPoint),
            Self::UShort | Self::Short => (16, SampleType::FixedPoint),
            Self::UInt | Self::Int => (32, SampleType::FixedPoint),
            Self::Float => (32, SampleType::FloatingPoint),
            Self::Double => (64, SampleType::FloatingPoint),
        }
    }

    /// Bytes per sample.
    pub fn bytes_per_sample(self) -> usize {
        self.sample_layout().0 as usize / 8
    }

    /// Native encoding of a decoded colour type, if it has one.
    pub fn from_color_type(color: ColorType) -> Option<Self> {
        match color {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
                Some(Self::UChar)
            }
            ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => {
                Some(Self::UShort)
            }
            ColorType::Rgb32F | ColorType::Rgba32F => Some(Self::Float),
            _ => None,
        }
    }
}

/// How the decoder interprets the bands of an image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interpretation {
    /// 8-bit greyscale, with or without alpha.
    Grey,
    /// 8-bit sRGB, with or without alpha.
    Srgb,
    Lab,
    /// 16-bit greyscale.
    Grey16,
    /// 16-bit RGB.
    Rgb16,
    /// Linear floating point RGB.
    ScRgb,
    /// Anything without a defined colour meaning.
    Multiband,
}

impl Interpretation {
    pub fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::La8 => Self::Grey,
            ColorType::Rgb8 | ColorType::Rgba8 => Self::Srgb,
            ColorType::L16 | ColorType::La16 => Self::Grey16,
            ColorType::Rgb16 | ColorType::Rgba16 => Self::Rgb16,
            ColorType::Rgb32F | ColorType::Rgba32F => Self::ScRgb,
            _ => Self::Multiband,
        }
    }

    /// The colour space served directly, or `None` when the image has to be
    /// converted to sRGB first.
    pub fn colour_space(self) -> Option<ColourSpace> {
        match self {
            Self::Srgb => Some(ColourSpace::Srgb),
            Self::Grey => Some(ColourSpace::Greyscale),
            Self::Lab => Some(ColourSpace::CieLab),
            _ => None,
        }
    }
}

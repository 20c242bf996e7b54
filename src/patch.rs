//! Template patch engine: overwrite texture regions inside decompressed
//! resource blobs.
//!
//! Banner templates are opaque CGFX blobs; this library does not walk
//! their object graph. Instead, the byte ranges of the textures worth
//! editing are known constants per template, kept here as an explicit
//! lookup table keyed by template and slot name. Patching a region is a
//! pure splice: encode the replacement raster with
//! [`crate::texture::tiled::encode`] and overwrite exactly the region's
//! byte count at its fixed offset. Unknown templates or slots are an
//! error, never guessed at.

use crate::formats::cbmd::Cbmd;
use crate::texture::{PixelFormat, etc1, tiled};
use crate::{Error, Result};

/// One texture's byte range inside a decompressed resource blob.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// Byte offset of the tiled pixel data within the blob.
    pub offset: usize,
    /// Width in pixels (multiple of 8).
    pub width: usize,
    /// Height in pixels (multiple of 8).
    pub height: usize,
    /// Pixel format of the stored texture.
    pub format: PixelFormat,
    /// Whether the stored texture is bottom-up. A property of the
    /// template, recorded per region rather than inferred.
    pub flip: bool,
}

impl Region {
    /// Encoded byte length of this region.
    pub fn byte_len(&self) -> usize {
        self.format.byte_len(self.width, self.height)
    }
}

/// Which blob of a banner a slot's regions live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The common CGFX blob.
    Common,
    /// Every present locale CGFX blob.
    EveryLocale,
}

/// A named texture slot: its target blob and one region per mip level.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    /// Blob the regions are spliced into.
    pub target: Target,
    /// Regions largest-first; single-level slots have one entry.
    pub regions: &'static [Region],
}

/// Banner templates with known texture layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// NSUI-style GBA VC banner: RGB565 cartridge label in the common
    /// blob, LA8 footer in each locale blob.
    NsuiGbaVc,
    /// Universal VC banner: RGBA8 label mip chain, LA8 footer and ETC1
    /// shell tint, all in the common blob.
    UniversalVc,
}

const NSUI_LABEL: [Region; 1] = [Region {
    offset: 0x38F80,
    width: 128,
    height: 128,
    format: PixelFormat::Rgb565,
    flip: false,
}];

const NSUI_FOOTER: [Region; 1] = [Region {
    offset: 0x1980,
    width: 256,
    height: 64,
    format: PixelFormat::La8,
    flip: false,
}];

const UVC_LABEL_MIPS: [Region; 5] = [
    Region { offset: 0x5880, width: 128, height: 128, format: PixelFormat::Rgba8, flip: false },
    Region { offset: 0x15880, width: 64, height: 64, format: PixelFormat::Rgba8, flip: false },
    Region { offset: 0x19880, width: 32, height: 32, format: PixelFormat::Rgba8, flip: false },
    Region { offset: 0x1A880, width: 16, height: 16, format: PixelFormat::Rgba8, flip: false },
    Region { offset: 0x1AC80, width: 8, height: 8, format: PixelFormat::Rgba8, flip: false },
];

const UVC_FOOTER: [Region; 1] = [Region {
    offset: 0x1AD80,
    width: 256,
    height: 64,
    format: PixelFormat::La8,
    flip: false,
}];

const UVC_SHELL: [Region; 1] = [Region {
    offset: 0x23C70,
    width: 128,
    height: 128,
    format: PixelFormat::Etc1,
    flip: false,
}];

impl Template {
    /// Look up a template by its identifier.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "nsui_gba_vc" => Ok(Template::NsuiGbaVc),
            "universal_vc" => Ok(Template::UniversalVc),
            _ => Err(Error::UnsupportedTemplate),
        }
    }

    /// Identifier accepted by [`Template::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Template::NsuiGbaVc => "nsui_gba_vc",
            Template::UniversalVc => "universal_vc",
        }
    }

    /// Look up a texture slot by name.
    pub fn slot(self, name: &str) -> Result<Slot> {
        match (self, name) {
            (Template::NsuiGbaVc, "label") => Ok(Slot {
                target: Target::Common,
                regions: &NSUI_LABEL,
            }),
            (Template::NsuiGbaVc, "footer") => Ok(Slot {
                target: Target::EveryLocale,
                regions: &NSUI_FOOTER,
            }),
            (Template::UniversalVc, "label") => Ok(Slot {
                target: Target::Common,
                regions: &UVC_LABEL_MIPS,
            }),
            (Template::UniversalVc, "footer") => Ok(Slot {
                target: Target::Common,
                regions: &UVC_FOOTER,
            }),
            (Template::UniversalVc, "shell") => Ok(Slot {
                target: Target::Common,
                regions: &UVC_SHELL,
            }),
            _ => Err(Error::UnsupportedTemplate),
        }
    }
}

/// Overwrite one region of `blob` with the encoding of `raster`.
///
/// `raster` is linear RGBA8 matching the region's dimensions. Fails with
/// [`Error::RegionOverflow`] if the region extends past the blob, without
/// touching it.
pub fn patch_region(blob: &mut [u8], region: &Region, raster: &[u8]) -> Result<()> {
    let encoded = tiled::encode(raster, region.width, region.height, region.format, region.flip)?;
    splice(blob, region, &encoded)
}

/// Overwrite one ETC1 region of `blob` with a solid color fill.
pub fn patch_region_solid(blob: &mut [u8], region: &Region, rgb: (u8, u8, u8)) -> Result<()> {
    if region.format != PixelFormat::Etc1 {
        return Err(Error::Parse("solid fill requires an ETC1 region"));
    }
    let encoded = etc1::solid_fill(rgb, region.byte_len());
    splice(blob, region, &encoded)
}

/// Patch a single-level slot of a parsed banner with `raster`.
///
/// Resolves `(template, slot_name)` in the lookup table and splices the
/// encoding into the common blob or every present locale blob as the slot
/// dictates. For mip-chained slots use [`apply_mips`].
pub fn apply(banner: &mut Cbmd, template: Template, slot_name: &str, raster: &[u8]) -> Result<()> {
    apply_mips(banner, template, slot_name, &[raster])
}

/// Patch a slot of a parsed banner, one raster per mip level.
///
/// `rasters` must supply exactly one pre-scaled raster per region of the
/// slot, largest first ([`Error::BadDimensions`] otherwise).
pub fn apply_mips(
    banner: &mut Cbmd,
    template: Template,
    slot_name: &str,
    rasters: &[&[u8]],
) -> Result<()> {
    let slot = template.slot(slot_name)?;
    if rasters.len() != slot.regions.len() {
        return Err(Error::BadDimensions);
    }

    for (region, raster) in slot.regions.iter().zip(rasters) {
        match slot.target {
            Target::Common => patch_region(&mut banner.common, region, raster)?,
            Target::EveryLocale => {
                for locale in banner.locales.iter_mut().flatten() {
                    patch_region(locale, region, raster)?;
                }
            }
        }
    }
    Ok(())
}

/// Patch an ETC1 slot of a parsed banner with a solid color.
pub fn apply_solid(
    banner: &mut Cbmd,
    template: Template,
    slot_name: &str,
    rgb: (u8, u8, u8),
) -> Result<()> {
    let slot = template.slot(slot_name)?;
    for region in slot.regions {
        match slot.target {
            Target::Common => patch_region_solid(&mut banner.common, region, rgb)?,
            Target::EveryLocale => {
                for locale in banner.locales.iter_mut().flatten() {
                    patch_region_solid(locale, region, rgb)?;
                }
            }
        }
    }
    Ok(())
}

fn splice(blob: &mut [u8], region: &Region, encoded: &[u8]) -> Result<()> {
    let end = region
        .offset
        .checked_add(encoded.len())
        .ok_or(Error::RegionOverflow)?;
    if end > blob.len() {
        return Err(Error::RegionOverflow);
    }
    blob[region.offset..end].copy_from_slice(encoded);
    Ok(())
}

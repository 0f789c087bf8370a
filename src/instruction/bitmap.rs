use crate::{Error, command::{Command, Density, QrErrorCorrection}};
use image::{DynamicImage, GenericImageView, Pixel};
use qrcode::{QrCode, Color};
use serde::{Serialize, Deserialize, ser::Serializer, de::Deserializer};

use base64::{Engine, engine::general_purpose::STANDARD};

use serde::ser::SerializeTuple;
use std::path::Path;

/// Modules of white space around a rasterized qr code
const QR_QUIET_ZONE: usize = 4;

/// Monochrome picture, ready to be sent as a bit image.
///
/// Pixels are stored row by row, 8 pixels per byte with the leftmost one in the most significant bit. A set bit is a burned (black) dot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    bits: Vec<u8>
}

impl Bitmap {
    /// Creates a blank bitmap
    pub fn new(width: u16, height: u16) -> Bitmap {
        Bitmap {
            width,
            height,
            bits: vec![0; Bitmap::stride_for(width) * height as usize]
        }
    }

    /// Creates a bitmap from a [DynamicImage](https://docs.rs/image/0.24/image/enum.DynamicImage.html)
    ///
    /// Images wider than `max_width` dots are scaled down, keeping the aspect ratio. Transparent pixels stay white, the rest is thresholded on luminance.
    pub fn from_image(dynamic_image: &DynamicImage, max_width: u16) -> Bitmap {
        let (im_width, im_height) = dynamic_image.dimensions();
        let (width, height) = if im_width > max_width as u32 {
            let aspect_ratio = (im_width as f64)/(im_height as f64);
            (max_width as u32, ((max_width as f64)/aspect_ratio).floor().max(1.0) as u32)
        } else {
            (im_width, im_height)
        };
        let height = height.min(u16::MAX as u32);

        let resized_image = image::imageops::resize(dynamic_image, width, height, image::imageops::FilterType::Nearest);

        let mut bitmap = Bitmap::new(width as u16, height as u16);
        for (x, y, pixel) in resized_image.enumerate_pixels() {
            let ps = pixel.channels();
            // Transparent pixels are not burned
            if ps[3] > 64 {
                let grayscale = 0.2126*(ps[0] as f64) + 0.7152*(ps[1] as f64) + 0.0722*(ps[2] as f64);
                if grayscale < 128.0 {
                    bitmap.set(x as u16, y as u16, true);
                }
            }
        }
        bitmap
    }

    /// Decodes an encoded picture (png, jpeg, gif, bmp) and converts it
    pub fn from_bytes(source: &[u8], max_width: u16) -> Result<Bitmap, Error> {
        let dynamic_image = image::load_from_memory(source)?;
        Ok(Bitmap::from_image(&dynamic_image, max_width))
    }

    /// Reads a picture from disk and converts it
    pub fn open<P: AsRef<Path>>(path: P, max_width: u16) -> Result<Bitmap, Error> {
        let dynamic_image = image::open(path)?;
        Ok(Bitmap::from_image(&dynamic_image, max_width))
    }

    /// Rasterizes a qr code, `module_size` dots per module and a 4 module quiet zone
    pub(crate) fn from_qr(data: &str, error_correction: QrErrorCorrection, module_size: u16) -> Result<Bitmap, Error> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), error_correction.ec_level())
            .map_err(|e| Error::InvalidInstruction(format!("qr code cannot hold the data, {}", e)))?;
        let modules = code.width();
        let colors = code.to_colors();
        let side = (modules + 2*QR_QUIET_ZONE) * (module_size as usize);
        if side > u16::MAX as usize {
            return Err(Error::InvalidInstruction(format!("rasterized qr code would be {} dots wide", side)));
        }

        let mut bitmap = Bitmap::new(side as u16, side as u16);
        for (idx, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x0 = (idx % modules + QR_QUIET_ZONE) * (module_size as usize);
            let y0 = (idx / modules + QR_QUIET_ZONE) * (module_size as usize);
            for y in y0..(y0 + module_size as usize) {
                for x in x0..(x0 + module_size as usize) {
                    bitmap.set(x as u16, y as u16, true);
                }
            }
        }
        Ok(bitmap)
    }

    /// Returns a copy no wider than `max_width` dots
    ///
    /// Same nearest neighbour scaling as [from_image](Bitmap::from_image), the aspect ratio is kept.
    pub fn scaled_down(&self, max_width: u16) -> Bitmap {
        if self.width <= max_width {
            return self.clone();
        }
        let height = ((self.height as u32 * max_width as u32) / self.width as u32).max(1) as u16;
        let mut bitmap = Bitmap::new(max_width, height);
        for y in 0..height {
            let source_y = (y as u32 * self.height as u32 / height as u32) as u16;
            for x in 0..max_width {
                let source_x = (x as u32 * self.width as u32 / max_width as u32) as u16;
                if self.pixel(source_x, source_y) {
                    bitmap.set(x, y, true);
                }
            }
        }
        bitmap
    }

    /// Width, in dots
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height, in dots
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns true if the dot gets burned. Out of bounds dots are white.
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.bits[self.stride() * (y as usize) + (x as usize) / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn set(&mut self, x: u16, y: u16, black: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.stride() * (y as usize) + (x as usize) / 8;
        let mask = 0x80 >> (x % 8);
        if black {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    fn stride(&self) -> usize {
        Bitmap::stride_for(self.width)
    }

    fn stride_for(width: u16) -> usize {
        (width as usize + 7) / 8
    }

    /// Builds the `ESC *` stripes for the picture.
    ///
    /// Line spacing is set to zero while the stripes get printed, so they stick together, and restored at the end. The last stripe gets padded with white dots.
    pub(crate) fn feed(&self, density: Density) -> Vec<u8> {
        let mut feed = Vec::new();
        feed.extend_from_slice(&Command::NoLine.as_bytes());

        let stripe_height = density.stripe_height();
        let bytes_per_column = stripe_height / 8;

        for top in (0..self.height as u32).step_by(stripe_height as usize) {
            // We first, declare a bitmap mode
            feed.extend_from_slice(&Command::Bitmap{density}.as_bytes());
            // The formula on how many pixels we will do, is nL + nH * 256
            feed.push((self.width % 256) as u8); // nL
            feed.push((self.width / 256) as u8); // nH
            for x in 0..self.width {
                for band in 0..bytes_per_column {
                    let mut column = 0u8;
                    for bit in 0..8 {
                        let y = top + band*8 + bit;
                        // The last stripe gets padded with white
                        if y < self.height as u32 && self.pixel(x, y as u16) {
                            column |= 0x80 >> bit;
                        }
                    }
                    feed.push(column);
                }
            }
            feed.push(b'\n'); // Line feed and print
        }

        feed.extend_from_slice(&Command::ResetLine.as_bytes());
        feed
    }
}

// Manual implementation of serialization
impl Serialize for Bitmap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.width)?;
        tup.serialize_element(&self.height)?;
        tup.serialize_element(&STANDARD.encode(&self.bits))?;
        tup.end()
    }
}

struct BitmapVisitor;

impl<'de> serde::de::Visitor<'de> for BitmapVisitor {
    type Value = Bitmap;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a tuple containing the width, the height and the base64 encoded dots of a bitmap")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error> where A: serde::de::SeqAccess<'de> {
        let width: u16 = seq.next_element()?.ok_or_else(|| serde::de::Error::custom("width missing"))?;
        let height: u16 = seq.next_element()?.ok_or_else(|| serde::de::Error::custom("height missing"))?;
        let value: String = seq.next_element()?.ok_or_else(|| serde::de::Error::custom("dots missing"))?;
        let bits = match STANDARD.decode(value) {
            Ok(v) => v,
            Err(_) => return Err(serde::de::Error::custom("string is not a valid base64 sequence"))
        };
        if bits.len() != Bitmap::stride_for(width) * (height as usize) {
            return Err(serde::de::Error::custom(format!("{} bytes do not describe a {}x{} bitmap", bits.len(), width, height)));
        }
        Ok(Bitmap {
            width,
            height,
            bits
        })
    }
}

// Manual implementation of deserialization
impl<'de> Deserialize<'de> for Bitmap {
    fn deserialize<D>(deserializer: D) -> Result<Bitmap, D::Error>
    where D: Deserializer<'de> {
        deserializer.deserialize_tuple(3, BitmapVisitor)
    }
}

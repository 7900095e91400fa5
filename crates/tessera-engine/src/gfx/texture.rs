use anyhow::{Context, Result, ensure};
use image::RgbaImage;

/// Decodes an encoded image (PNG, JPEG) into RGBA8.
pub fn decode_rgba(bytes: &[u8], label: &str) -> Result<RgbaImage> {
    let rgba = image::load_from_memory(bytes)
        .with_context(|| format!("failed to decode texture {label:?}"))?
        .to_rgba8();
    ensure!(rgba.width() > 0 && rgba.height() > 0, "texture {label:?} is empty");
    Ok(rgba)
}

/// Sampled 2D texture with its view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decodes an encoded image and uploads it.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let rgba = decode_rgba(bytes, label)?;
        Self::from_rgba(device, queue, &rgba, label)
    }

    /// Uploads `rgba` as RGBA8 sRGB.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &RgbaImage,
        label: &str,
    ) -> Result<Self> {
        let (width, height) = rgba.dimensions();
        ensure!(width > 0 && height > 0, "texture {label:?} is empty");

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Bind group layout for a filterable 2D texture at binding 0 and its sampler at 1.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Bind group matching [`Texture::bind_group_layout`].
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    fn encode(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_rgba() {
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 120, 7, 255]));
        let decoded = decode_rgba(&encode(&img, ImageFormat::Png), "png").unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn decodes_jpeg_to_opaque_rgba() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 40, 40, 255]));
        let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
        let mut bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg).unwrap();

        let decoded = decode_rgba(&bytes, "jpeg").unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert!(decoded.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn garbage_bytes_name_the_texture() {
        let err = decode_rgba(b"definitely not an image", "broken.png").unwrap_err();
        assert!(format!("{err:#}").contains("broken.png"));
    }
}

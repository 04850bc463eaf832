use super::helpers;
use wgpu;

/// Multisampled color target resolved into the swapchain each frame.
///
/// Sized to the surface; recreated whenever the surface is reconfigured.
pub(crate) struct MsaaTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    samples: u32,
}

impl MsaaTarget {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        samples: u32,
    ) -> Self {
        let (tex, view) =
            helpers::create_color_texture(device, "msaa_color", width, height, format, samples);
        Self {
            tex,
            view,
            format,
            samples,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.tex, self.view) = helpers::create_color_texture(
            device,
            "msaa_color",
            width,
            height,
            self.format,
            self.samples,
        );
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.tex.width(), self.tex.height())
    }
}

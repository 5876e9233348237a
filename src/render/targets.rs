use super::helpers;
use wgpu;

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen scene color target.
///
/// Tubes and snow accumulate additively into a half-float texture (signed
/// contributions need headroom below zero and above one); the composite pass
/// blits it to the swapchain. Recreated on resize.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (scene_tex, scene_view) = helpers::create_color_texture(
            device,
            "scene_tex",
            width.max(1),
            height.max(1),
            SCENE_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            scene_tex,
            scene_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}

//! Replays a recorded gesture session against an image and writes the crop.

use std::ffi::OsString;
use std::path::PathBuf;

use image::RgbaImage;

use crate::config::{load_crop_config, CropConfig};
use crate::controller::{CropController, OverlayAttrs, OverlayRenderer};
use crate::error::{AppError, AppResult};
use crate::script::GestureScript;
use crate::viewport::ViewportFactory;

/// Headless overlay: reports what would be drawn.
#[derive(Debug, Default)]
pub struct TracingOverlay {
    redraws: u64,
}

impl TracingOverlay {
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl OverlayRenderer for TracingOverlay {
    fn set_attrs(&mut self, attrs: OverlayAttrs) {
        tracing::debug!(
            rect = ?attrs.rect,
            alpha = attrs.background_alpha,
            border = attrs.with_border,
            "overlay updated"
        );
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropJob {
    pub image: PathBuf,
    pub script: PathBuf,
    pub output: PathBuf,
}

impl CropJob {
    pub fn from_args(args: Vec<OsString>) -> AppResult<Self> {
        let [image, script, output]: [OsString; 3] =
            args.try_into().map_err(|_| AppError::Usage)?;
        Ok(Self {
            image: image.into(),
            script: script.into(),
            output: output.into(),
        })
    }
}

pub fn run(args: Vec<OsString>) -> AppResult<()> {
    let job = CropJob::from_args(args)?;
    let config = load_crop_config();
    let script = GestureScript::load(&job.script)?;
    let source = image::open(&job.image)?.to_rgba8();

    let cropped = replay(config, &script, &source)?;
    cropped.save(&job.output)?;
    tracing::info!(
        output = %job.output.display(),
        width = cropped.width(),
        height = cropped.height(),
        "crop written"
    );
    Ok(())
}

/// Lays the image out fit-centred in the script's container, feeds every
/// event through a controller, then extracts the final crop.
pub fn replay(
    config: CropConfig,
    script: &GestureScript,
    source: &RgbaImage,
) -> AppResult<RgbaImage> {
    let base = script
        .container
        .fit_centered(source.width() as f32, source.height() as f32);
    let factory = ViewportFactory::new(base);
    let transform = factory.transform();
    let mut controller =
        CropController::new(config, script.container, factory, TracingOverlay::default())?;

    for event in &script.events {
        let outcome = controller.handle_event(*event);
        tracing::debug!(?event, ?outcome, "replayed gesture");
    }
    tracing::debug!(
        redraws = controller.renderer().redraws(),
        rect = ?controller.rect(),
        "gesture replay finished"
    );

    let displayed = transform.borrow().displayed_rect();
    Ok(controller.request_crop(&displayed, source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionFailure;

    fn square_image() -> RgbaImage {
        RgbaImage::from_fn(100, 100, |x, y| image::Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn replay_without_events_crops_default_region() {
        let script = GestureScript::parse(r#"{"container": {"width": 1000, "height": 1000}}"#)
            .expect("script should parse");
        let cropped =
            replay(CropConfig::default(), &script, &square_image()).expect("crop should succeed");
        assert_eq!(cropped.dimensions(), (800, 800));
    }

    #[test]
    fn replay_applies_corner_resize() {
        let script = GestureScript::parse(
            r#"{
                "container": {"width": 1000, "height": 1000},
                "events": [
                    {"event": "touch_down", "x": 890, "y": 890},
                    {"event": "moved", "dx": 0, "dy": -200},
                    {"event": "touch_up"}
                ]
            }"#,
        )
        .expect("script should parse");
        let cropped =
            replay(CropConfig::default(), &script, &square_image()).expect("crop should succeed");
        assert_eq!(cropped.dimensions(), (800, 600));
    }

    #[test]
    fn replay_reports_invalid_config() {
        let script = GestureScript::parse(r#"{"container": {"width": 1000, "height": 1000}}"#)
            .expect("script should parse");
        let config = CropConfig {
            height_fraction: 2.0,
            ..CropConfig::default()
        };
        let err = replay(config, &script, &square_image()).expect_err("config should fail");
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn replay_reports_empty_source() {
        let script = GestureScript::parse(r#"{"container": {"width": 1000, "height": 1000}}"#)
            .expect("script should parse");
        let err = replay(CropConfig::default(), &script, &RgbaImage::new(0, 0))
            .expect_err("empty image should fail");
        assert!(matches!(
            err,
            AppError::Extraction(ExtractionFailure::HiddenImage { .. })
        ));
    }

    #[test]
    fn crop_job_requires_three_paths() {
        let err = CropJob::from_args(vec!["a.png".into()]).expect_err("too few args");
        assert!(matches!(err, AppError::Usage));

        let job = CropJob::from_args(vec!["a.png".into(), "s.json".into(), "o.png".into()])
            .expect("three args should parse");
        assert_eq!(job.output, PathBuf::from("o.png"));
    }
}

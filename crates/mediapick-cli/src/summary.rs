use std::path::Path;

use console::Style;
use mediapick_core::crop::controller::CropController;
use mediapick_core::io::crop::CropRect;
use mediapick_core::media::{MediaKind, MediaResult};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    mode: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            mode: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn print_region(s: &Styles, controller: &CropController, region: &CropRect) {
    println!(
        "  {:<14}{}",
        s.label.apply_to("Aspect"),
        s.mode.apply_to(controller.aspect_mode())
    );
    let crop = controller.crop_rect();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Crop (view)"),
        s.value.apply_to(format!(
            "{:.1},{:.1} {:.1}x{:.1}",
            crop.left,
            crop.top,
            crop.width(),
            crop.height()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Region"),
        s.value.apply_to(format!(
            "{},{} {}x{}",
            region.x, region.y, region.width, region.height
        ))
    );
}

pub fn print_info(
    file: &Path,
    kind: Option<MediaKind>,
    source: (u32, u32),
    decoded: (u32, u32),
    controller: &CropController,
    region: &CropRect,
) {
    let s = Styles::new();
    print_title(&s, "Media Info");

    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(file.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Kind"),
        s.value
            .apply_to(kind.map_or_else(|| "unknown".to_string(), |k| k.to_string()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", source.0, source.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Decoded"),
        s.value.apply_to(format!("{}x{}", decoded.0, decoded.1))
    );
    print_region(&s, controller, region);
    println!();
}

pub fn print_crop_summary(file: &Path, controller: &CropController, region: &CropRect) {
    let s = Styles::new();
    print_title(&s, "Crop");
    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
    print_region(&s, controller, region);
    println!();
}

pub fn print_media_result(result: &MediaResult) {
    let s = Styles::new();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(result.locator.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Result"),
        s.value.apply_to(format!(
            "{} {}x{}",
            result.kind, result.width, result.height
        ))
    );
    if let Some(ms) = result.duration_ms {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Duration"),
            s.value.apply_to(format!("{ms} ms"))
        );
    }
    println!();
}

//! Annotate a photo with a caption and a scalebar.
//!
//! Usage: `cargo run --example annotate -- <image> [font.ttf]`

use image_overlay::{overlay_scalebar, overlay_text, Anchor, PixelFont, TextRasterizer, TtfFont};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("Usage: annotate <image> [font.ttf]");
        return Ok(());
    };

    let font: Box<dyn TextRasterizer> = match args.next() {
        Some(path) => Box::new(TtfFont::from_path(path)?),
        None => Box::new(PixelFont),
    };

    let mut img = image::open(&input)?.to_rgba8();
    overlay_text(&mut img, "sol 113, waypoint delta", Anchor::TopLeft, font.as_ref())?;
    overlay_scalebar(&mut img, Anchor::BottomRight, font.as_ref())?;

    img.save("annotated.png")?;
    println!("wrote annotated.png");
    Ok(())
}

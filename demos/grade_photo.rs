use tintmix::{Canvas, Composer, FilterRegistry, SourceImage};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        let registry = FilterRegistry::with_builtins();
        let names: Vec<&str> = registry.names().collect();
        eprintln!("usage: grade_photo <image> [filter ...]");
        eprintln!("filters: {}", names.join(", "));
        std::process::exit(2);
    };
    let filters: Vec<String> = args.collect();

    let canvas = Canvas::new(960, 540)?;
    let mut composer = Composer::new(canvas);
    composer.set_source(SourceImage::open(&input, canvas)?)?;

    if filters.is_empty() {
        composer.add_filter("Sepia")?;
    }
    for name in &filters {
        composer.add_filter(name)?;
    }

    let Some(frame) = composer.render() else {
        anyhow::bail!("no source loaded");
    };

    let out_path = std::path::Path::new("target").join("grade_photo.png");
    image::save_buffer_with_format(
        &out_path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

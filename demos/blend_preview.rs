use tintmix::{Canvas, Command, CommandOutcome, Composer, SourceImage};

fn gradient_source(canvas: Canvas) -> anyhow::Result<SourceImage> {
    let image = image::RgbaImage::from_fn(canvas.width, canvas.height, |x, y| {
        let fx = x as f32 / (canvas.width - 1) as f32;
        let fy = y as f32 / (canvas.height - 1) as f32;
        image::Rgba([
            (fx * 255.0) as u8,
            (fy * 255.0) as u8,
            ((1.0 - fx) * (1.0 - fy) * 255.0) as u8,
            255,
        ])
    });
    Ok(SourceImage::from_rgba8(
        canvas.width,
        canvas.height,
        image.into_raw(),
    )?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let canvas = Canvas::new(480, 270)?;
    let mut composer = Composer::new(canvas);
    composer.set_source(gradient_source(canvas)?)?;

    composer.dispatch(Command::AddFilter {
        name: "Warm".to_string(),
    })?;
    composer.dispatch(Command::AddFilter {
        name: "Contrast".to_string(),
    })?;
    composer.dispatch(Command::SetIntensity {
        index: 1,
        value: 0.6,
    })?;
    composer.dispatch(Command::Combine)?;

    let outcome = composer.dispatch(Command::SaveFilter {
        name: "Evening".to_string(),
    })?;
    if let CommandOutcome::Saved { name } = outcome {
        println!("saved blend as '{name}'");
    }

    let Some(frame) = composer.render() else {
        anyhow::bail!("no source loaded");
    };

    let out_path = std::path::Path::new("target").join("blend_preview.png");
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

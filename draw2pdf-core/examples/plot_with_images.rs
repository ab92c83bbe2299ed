//! Writes a few pages of line plots, each with a heat-map image beside it.
//!
//! Run with: `cargo run --example plot_with_images [output.pdf]`

use draw2pdf::{Color, Document, LineStyle, Point, RasterImage, Rectangle, TextStyle, WriterConfig};
use std::env;
use std::fs::File;
use std::io::BufWriter;

fn heat_map(width: u32, height: u32, phase: f64) -> Result<RasterImage, draw2pdf::PdfError> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((x as f64 * 0.2 + phase).sin() * (y as f64 * 0.2).cos() + 1.0) / 2.0;
            pixels.extend_from_slice(&[(v * 255.0) as u8, 0, ((1.0 - v) * 255.0) as u8]);
        }
    }
    RasterImage::rgb(width, height, pixels)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let output_path = if args.len() >= 2 {
        &args[1]
    } else {
        "plot_with_images.pdf"
    };

    println!("Creating plots: {output_path}");

    let letter = Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0);
    let writer = BufWriter::new(File::create(output_path)?);
    let config = WriterConfig::default().with_content_compression(true);
    let mut doc = Document::from_writer(writer, letter, config)?;
    doc.set_title("Sine plots");

    for page in 0..3 {
        if page > 0 {
            doc.next_page()?;
        }
        let phase = page as f64;

        doc.set_text_style(TextStyle::new(18.0, Color::black()));
        doc.draw_text(Point::new(72.0, 740.0), &format!("Page {} - phase {phase}", page + 1));

        // Axes
        doc.set_line_style(LineStyle::new(Color::black(), 1.0));
        doc.draw_polyline(&[Point::new(72.0, 700.0), Point::new(72.0, 400.0), Point::new(540.0, 400.0)]);

        let samples: Vec<Point> = (0..=200)
            .map(|i| {
                let t = i as f64 / 200.0;
                Point::new(72.0 + t * 468.0, 550.0 + (t * 12.0 + phase).sin() * 120.0)
            })
            .collect();
        doc.set_line_style(LineStyle::new(Color::blue(), 0.75));
        doc.draw_polyline(&samples);

        doc.draw_image(heat_map(64, 64, phase)?, 72.0, 72.0, 256.0, 256.0)?;
    }

    doc.close()?;

    println!("PDF created successfully: {output_path}");

    Ok(())
}

use draw2pdf::{Color, Document, FillStyle, LineStyle, Point, Rectangle, TextStyle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A4 in points
    let a4 = Rectangle::from_position_and_size(0.0, 0.0, 595.0, 842.0);
    let mut doc = Document::create("hello_world.pdf", a4)?;
    doc.set_title("Hello World PDF");
    doc.set_author("draw2pdf");

    // Outlined and filled box
    doc.set_line_style(LineStyle::new(Color::red(), 2.0));
    doc.set_fill_style(FillStyle::new(Color::rgb(0.0, 0.5, 1.0)));
    doc.draw_rectangle(&Rectangle::from_position_and_size(50.0, 50.0, 200.0, 100.0));

    // Triangle, outline only
    doc.set_fill_style(FillStyle::null());
    doc.draw_polygon(&[
        Point::new(300.0, 350.0),
        Point::new(400.0, 350.0),
        Point::new(350.0, 450.0),
    ]);

    doc.set_text_style(TextStyle::new(24.0, Color::black()));
    doc.draw_text(Point::new(100.0, 700.0), "¡Hola, mundo!");
    doc.set_text_style(TextStyle::new(16.0, Color::gray(0.3)));
    doc.draw_text(Point::new(100.0, 650.0), "This is our first PDF document");

    doc.close()?;

    println!("PDF created successfully: hello_world.pdf");

    Ok(())
}

//! Property-based tests for document assembly
//!
//! Random sequences of drawing calls must always produce a file whose
//! cross-reference table lists every object exactly once, in order, with
//! offsets pointing at the object headers.

mod common;

use common::{check_structure, count, object_text, test_config};
use draw2pdf::{
    Color, Document, FillStyle, LineStyle, Point, RasterImage, Rectangle, TextStyle,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Call {
    LineStyle(bool, f64),
    FillStyle(bool),
    TextStyle(f64),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    Rectangle(Rectangle),
    Text(String),
    Image(u32, u32),
    NextPage,
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn call_strategy() -> impl Strategy<Value = Call> {
    prop_oneof![
        (any::<bool>(), 0.0..10.0f64).prop_map(|(solid, w)| Call::LineStyle(solid, w)),
        any::<bool>().prop_map(Call::FillStyle),
        (1.0..72.0f64).prop_map(Call::TextStyle),
        prop::collection::vec(point_strategy(), 0..6).prop_map(Call::Polyline),
        prop::collection::vec(point_strategy(), 0..6).prop_map(Call::Polygon),
        (point_strategy(), point_strategy()).prop_map(|(a, b)| Call::Rectangle(Rectangle::new(a, b))),
        "[ -~]{0,20}".prop_map(Call::Text),
        (0u32..5, 0u32..5).prop_map(|(w, h)| Call::Image(w, h)),
        Just(Call::NextPage),
    ]
}

fn apply(doc: &mut Document<Vec<u8>>, call: &Call) {
    match call {
        Call::LineStyle(true, width) => doc.set_line_style(LineStyle::new(Color::red(), *width)),
        Call::LineStyle(false, _) => doc.set_line_style(LineStyle::null()),
        Call::FillStyle(true) => doc.set_fill_style(FillStyle::new(Color::gray(0.5))),
        Call::FillStyle(false) => doc.set_fill_style(FillStyle::null()),
        Call::TextStyle(height) => doc.set_text_style(TextStyle::new(*height, Color::blue())),
        Call::Polyline(points) => doc.draw_polyline(points),
        Call::Polygon(points) => doc.draw_polygon(points),
        Call::Rectangle(rect) => doc.draw_rectangle(rect),
        Call::Text(text) => doc.draw_text(Point::new(10.0, 10.0), text),
        Call::Image(w, h) => {
            let pixels = vec![0x5A; (*w * *h * 3) as usize];
            let image = RasterImage::rgb(*w, *h, pixels).unwrap();
            doc.draw_image(image, 0.0, 0.0, 10.0, 10.0).unwrap();
        }
        Call::NextPage => doc.next_page().unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_xref_is_complete_and_ordered(calls in prop::collection::vec(call_strategy(), 0..40)) {
        let page_box = Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0);
        let mut doc = Document::from_writer(Vec::new(), page_box, test_config()).unwrap();
        for call in &calls {
            apply(&mut doc, call);
        }
        let bytes = doc.close().unwrap();

        // check_structure asserts offsets and uniqueness.
        let parsed = check_structure(&bytes);

        let pages = 1 + calls.iter().filter(|c| matches!(c, Call::NextPage)).count();
        let images = calls
            .iter()
            .filter(|c| matches!(c, Call::Image(w, h) if *w > 0 && *h > 0))
            .count();
        // Catalog, pages tree, info, three per page, one per image.
        prop_assert_eq!(parsed.entries.len(), 1 + 3 + pages * 3 + images);
        prop_assert_eq!(count(&bytes, b"/Type /Page\r\n"), pages);
        let count_entry = format!("/Count {pages}\r\n");
        prop_assert!(object_text(&bytes, 2).contains(&count_entry));
    }

    #[test]
    fn test_repack_gray_size(width in 1u32..32, height in 1u32..32, padding in 0usize..8) {
        let stride = width as usize + padding;
        let pixels = vec![1u8; stride * height as usize];
        let image = RasterImage::new(width, height, 8, stride, pixels).unwrap();
        prop_assert_eq!(image.repack().len(), (width * height) as usize);
    }

    #[test]
    fn test_repack_rgba_drops_every_fourth_byte(
        width in 1u32..16,
        height in 1u32..16,
        padding in 0usize..8,
    ) {
        let stride = width as usize * 4 + padding;
        let pixels: Vec<u8> = (0..stride * height as usize).map(|i| (i % 251) as u8).collect();
        let image = RasterImage::new(width, height, 32, stride, pixels.clone()).unwrap();

        let packed = image.repack();
        prop_assert_eq!(packed.len(), (3 * width * height) as usize);

        let mut expected = Vec::with_capacity(packed.len());
        for row in pixels.chunks(stride) {
            for pixel in row[..width as usize * 4].chunks_exact(4) {
                expected.extend_from_slice(&pixel[..3]);
            }
        }
        prop_assert_eq!(packed, expected);
    }
}

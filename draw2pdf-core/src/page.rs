use crate::geometry::Rectangle;
use crate::graphics::{ContentStream, RasterImage, DEFAULT_FONT};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::writer::ObjectAllocator;

/// Procedure sets every page advertises.
const PROC_SET: [&str; 5] = ["PDF", "Text", "ImageB", "ImageC", "ImageI"];

/// An image drawn on the current page, waiting to be written when the page
/// ends.
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub id: ObjectId,
    /// Resource name, `Im0`, `Im1`, ... in drawing order.
    pub name: String,
    pub image: RasterImage,
}

/// Everything that belongs to the page currently being drawn.
///
/// Object numbers for the page, its content stream and its XObject table are
/// reserved up front; nothing is written until the page ends.
#[derive(Debug)]
pub struct PageState {
    pub id: ObjectId,
    pub contents_id: ObjectId,
    pub xobjects_id: ObjectId,
    pub content: ContentStream,
    pub images: Vec<PendingImage>,
}

impl PageState {
    pub fn begin(allocator: &mut ObjectAllocator) -> Self {
        Self {
            id: allocator.allocate(),
            contents_id: allocator.allocate(),
            xobjects_id: allocator.allocate(),
            content: ContentStream::new(),
            images: Vec::new(),
        }
    }

    /// Registers an image under the next free resource name and returns
    /// that name.
    pub fn add_image(&mut self, id: ObjectId, image: RasterImage) -> String {
        let name = format!("Im{}", self.images.len());
        self.images.push(PendingImage {
            id,
            name: name.clone(),
            image,
        });
        name
    }

    pub fn page_dictionary(&self, parent: ObjectId, media_box: &Rectangle) -> Dictionary {
        let media_box = media_box.normalize();

        let mut font = Dictionary::new();
        font.set("Type", Object::name("Font"));
        font.set("Subtype", Object::name("Type1"));
        font.set("BaseFont", Object::name("Helvetica"));
        let mut fonts = Dictionary::new();
        fonts.set(DEFAULT_FONT, font);

        let mut resources = Dictionary::new();
        resources.set(
            "ProcSet",
            Object::Array(PROC_SET.iter().map(|name| Object::name(*name)).collect()),
        );
        resources.set("Font", fonts);
        resources.set("XObject", self.xobjects_id);

        let mut page = Dictionary::new();
        page.set("Type", Object::name("Page"));
        page.set("Parent", parent);
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Real(media_box.min.x),
                Object::Real(media_box.min.y),
                Object::Real(media_box.max.x),
                Object::Real(media_box.max.y),
            ]),
        );
        page.set("Contents", self.contents_id);
        page.set("Resources", resources);
        page
    }

    /// The per-page XObject table, entries in drawing order.
    pub fn xobject_dictionary(&self) -> Dictionary {
        self.images
            .iter()
            .map(|pending| (pending.name.clone(), Object::Reference(pending.id)))
            .collect()
    }
}

//! PDF writer built on `lopdf`.
//!
//! Two stages: `layout_pages` positions every wrapped line (pure, testable), then
//! `encode_pages` turns the positioned lines into content streams and a document.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde::{Deserialize, Serialize};

use crate::models::document::{Block, BlockStyle};
use crate::render::font_metrics::{get_metrics, BuiltinFont};
use crate::render::{DocumentRenderer, RenderError};

/// Page geometry in PDF points. Defaults: US Letter, text column 450pt wide at (50, 50).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left: f32,
    pub top: f32,
    pub bottom: f32,
    pub column_width: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_spacing: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            left: 50.0,
            top: 50.0,
            bottom: 50.0,
            column_width: 450.0,
            line_spacing: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TextStyle {
    font: BuiltinFont,
    size: f32,
    indent: f32,
    centered: bool,
    underline: bool,
}

fn text_style(style: BlockStyle) -> TextStyle {
    let plain = TextStyle {
        font: BuiltinFont::Helvetica,
        size: 12.0,
        indent: 0.0,
        centered: false,
        underline: false,
    };
    match style {
        BlockStyle::Title => TextStyle { size: 16.0, centered: true, ..plain },
        BlockStyle::Subtitle => TextStyle { size: 10.0, centered: true, ..plain },
        BlockStyle::Heading => TextStyle {
            font: BuiltinFont::HelveticaBold,
            underline: true,
            ..plain
        },
        BlockStyle::Body | BlockStyle::Spacer => plain,
        BlockStyle::Indented => TextStyle { size: 10.0, indent: 20.0, ..plain },
    }
}

/// One line of text at its final position (baseline origin, PDF coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub font: BuiltinFont,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub underline_width: Option<f32>,
}

struct Cursor<'a> {
    layout: &'a PageLayout,
    pages: Vec<Vec<PlacedLine>>,
    /// Top edge of the next line.
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            pages: vec![Vec::new()],
            y: layout.page_height - layout.top,
        }
    }

    fn advance(&mut self, size: f32) -> f32 {
        let height = size * self.layout.line_spacing;
        if self.y - height < self.layout.bottom {
            self.pages.push(Vec::new());
            self.y = self.layout.page_height - self.layout.top;
        }
        let baseline = self.y - size;
        self.y -= height;
        baseline
    }

    fn place(&mut self, style: &TextStyle, text: String) {
        let baseline = self.advance(style.size);
        let metrics = get_metrics(style.font);
        let width = metrics.measure_pt(&text, style.size);
        let x = if style.centered {
            self.layout.left + ((self.layout.column_width - width) / 2.0).max(0.0)
        } else {
            self.layout.left + style.indent
        };
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine {
                font: style.font,
                size: style.size,
                x,
                y: baseline,
                text,
                underline_width: style.underline.then_some(width),
            });
        }
    }
}

/// Positions every line of `blocks`, paginating as the column fills.
pub fn layout_pages(blocks: &[Block], layout: &PageLayout) -> Vec<Vec<PlacedLine>> {
    let mut cursor = Cursor::new(layout);

    for block in blocks {
        let style = text_style(block.style);
        if block.style == BlockStyle::Spacer {
            cursor.advance(style.size);
            continue;
        }

        let metrics = get_metrics(style.font);
        let width = layout.column_width - style.indent;
        for paragraph in block.text.split('\n') {
            let lines = metrics.wrap(paragraph, style.size, width);
            if lines.is_empty() {
                cursor.advance(style.size);
            }
            for line in lines {
                cursor.place(&style, line);
            }
        }
    }

    cursor.pages
}

/// Serializes positioned pages into PDF bytes.
pub fn encode_pages(
    pages: &[Vec<PlacedLine>],
    layout: &PageLayout,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_dict = |font: BuiltinFont| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    };
    let regular_id = doc.add_object(font_dict(BuiltinFont::Helvetica));
    let bold_id = doc.add_object(font_dict(BuiltinFont::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            BuiltinFont::Helvetica.resource_name() => regular_id,
            BuiltinFont::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let bytes = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        layout.page_width.into(),
        layout.page_height.into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(out)
}

fn page_operations(page: &[PlacedLine]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.len() * 5);
    for line in page {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![line.font.resource_name().into(), line.size.into()],
        ));
        ops.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
        ops.push(Operation::new("ET", vec![]));

        if let Some(width) = line.underline_width {
            let y = line.y - 2.0;
            ops.push(Operation::new("w", vec![0.5_f32.into()]));
            ops.push(Operation::new("m", vec![line.x.into(), y.into()]));
            ops.push(Operation::new("l", vec![(line.x + width).into(), y.into()]));
            ops.push(Operation::new("S", vec![]));
        }
    }
    ops
}

/// Default renderer: US Letter, Helvetica, single text column.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    pub layout: PageLayout,
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, blocks: &[Block]) -> Result<Vec<u8>, RenderError> {
        if blocks.is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        let pages = layout_pages(blocks, &self.layout);
        encode_pages(&pages, &self.layout)
    }
}

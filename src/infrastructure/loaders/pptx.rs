use crate::domain::extraction::DocumentSegment;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// One segment per slide, in slide order.
///
/// Slides live in `ppt/slides/slideN.xml`; visible text sits in `<a:t>` runs
/// grouped into `<a:p>` paragraphs.
pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let file = File::open(path).map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| format!("cannot parse presentation '{}': {}", path.display(), e))?;

    let slide_name = Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("static slide pattern");
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = slide_name.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let text_run = Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>").expect("static run pattern");
    let mut segments = Vec::with_capacity(slides.len());

    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| format!("cannot open slide '{}': {}", name, e))?
            .read_to_string(&mut xml)
            .map_err(|e| format!("cannot read slide '{}': {}", name, e))?;

        segments.push(DocumentSegment::new(slide_text(&xml, &text_run)));
    }

    Ok(segments)
}

fn slide_text(xml: &str, text_run: &Regex) -> String {
    xml.split("</a:p>")
        .map(|paragraph| {
            text_run
                .captures_iter(paragraph)
                .filter_map(|c| c.get(1))
                .map(|m| unescape_xml(m.as_str()))
                .collect::<String>()
        })
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

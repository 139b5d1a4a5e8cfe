// Kindle (mobipocket) dictionary writer.
//
// Output is an OPF package next to a series of HTML pages:
//
//   <out_dir>/dict000.html, dict001.html, ...   entries, `max_entries_per_page` each
//   <out_dir>/<name>.opf                        manifest, spine, dictionary metadata
//
// Each entry is an `idx:entry` whose first index form is the `idx:orth`
// value and whose remaining forms are `idx:iform` inflections. kindlegen
// rejects entries with more than 255 inflections, so an entry with more
// than `max_forms_per_entry` forms is written as several entries sharing
// the same headword and description.
//
// Headword and description markup arrive pre-rendered (and pre-escaped)
// from the generator; only index forms and manifest fields are escaped here.
//
// See also: `config.rs` for `BookMetadata` and `WriterLimits`.

use crate::config::{BookMetadata, WriterLimits};
use crate::error::KindleError;
use aradict_morph::ConsolidatedEntry;
use quick_xml::escape::escape;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const PAGE_HEADER: &str = r#"<html xmlns:math="http://exslt.org/math" xmlns:svg="http://www.w3.org/2000/svg"
  xmlns:tl="http://www.kreutzfeldt.de/tl"
  xmlns:saxon="http://saxon.sf.net/" xmlns:xs="http://www.w3.org/2001/XMLSchema"
  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
  xmlns:cx="http://www.kreutzfeldt.de/mmc/cx"
  xmlns:dc="http://purl.org/dc/elements/1.1/"
  xmlns:mbp="http://www.kreutzfeldt.de/mmc/mbp"
  xmlns:mmc="http://www.kreutzfeldt.de/mmc/mmc"
  xmlns:idx="http://www.mobipocket.com/idx">
  <head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"></head>
  <body>
  <mbp:frameset>
"#;

const PAGE_FOOTER: &str = "  </mbp:frameset>\n  </body>\n</html>\n";

/// Counters for a written book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WriterStats {
    pub pages: usize,
    /// Entries handed to the writer with at least one form.
    pub original_entries: usize,
    /// Entries written after splitting oversized ones.
    pub expanded_entries: usize,
    /// Entries handed to the writer with no forms (skipped).
    pub empty_entries: usize,
    pub index_size: usize,
}

struct Page {
    path: PathBuf,
    out: BufWriter<File>,
    entries: usize,
}

impl Page {
    /// Create `dictNNN.html` in `out_dir` and write the page header.
    fn open(out_dir: &Path, name: &str) -> Result<Self, KindleError> {
        let path = out_dir.join(format!("{name}.html"));
        let file = File::create(&path).map_err(|e| KindleError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        out.write_all(PAGE_HEADER.as_bytes())
            .map_err(|e| KindleError::io(&path, e))?;
        tracing::debug!(page = %name, "started dictionary page");
        Ok(Page {
            path,
            out,
            entries: 0,
        })
    }

    fn close(mut self) -> Result<(), KindleError> {
        self.out
            .write_all(PAGE_FOOTER.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| KindleError::io(&self.path, e))
    }
}

/// Streams entries into paginated HTML, then writes the OPF manifest.
///
/// A page is always open between `create` and `finish`.
pub struct KindleWriter {
    out_dir: PathBuf,
    opf_path: PathBuf,
    title: String,
    book: BookMetadata,
    limits: WriterLimits,
    page_names: Vec<String>,
    page: Page,
    stats: WriterStats,
}

impl KindleWriter {
    /// Create the output directory and open the first page.
    pub fn create(
        dest_file: &Path,
        title: &str,
        book: &BookMetadata,
        limits: WriterLimits,
    ) -> Result<Self, KindleError> {
        let out_dir = match dest_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&out_dir).map_err(|e| KindleError::io(&out_dir, e))?;

        let first = page_name(0);
        let page = Page::open(&out_dir, &first)?;
        Ok(KindleWriter {
            out_dir,
            opf_path: dest_file.to_path_buf(),
            title: title.to_string(),
            book: book.clone(),
            limits,
            page_names: vec![first],
            page,
            stats: WriterStats::default(),
        })
    }

    /// Add one dictionary entry, splitting it if it has too many forms.
    pub fn add_entry(
        &mut self,
        headword: &str,
        forms: &[String],
        description: &str,
    ) -> Result<(), KindleError> {
        if forms.is_empty() {
            self.stats.empty_entries += 1;
            return Ok(());
        }
        self.stats.original_entries += 1;
        for chunk in forms.chunks(self.limits.max_forms_per_entry.max(1)) {
            self.write_entry(headword, chunk, description)?;
        }
        Ok(())
    }

    /// Close the last page and write the OPF manifest.
    pub fn finish(self) -> Result<WriterStats, KindleError> {
        let KindleWriter {
            opf_path,
            title,
            book,
            page_names,
            page,
            mut stats,
            ..
        } = self;
        page.close()?;
        let opf = render_opf(&title, &book, &page_names);
        std::fs::write(&opf_path, opf).map_err(|e| KindleError::io(&opf_path, e))?;
        stats.pages = page_names.len();
        tracing::info!(
            opf = %opf_path.display(),
            pages = stats.pages,
            entries = stats.expanded_entries,
            "wrote kindle dictionary"
        );
        Ok(stats)
    }

    fn write_entry(
        &mut self,
        headword: &str,
        forms: &[String],
        description: &str,
    ) -> Result<(), KindleError> {
        if self.page.entries >= self.limits.max_entries_per_page.max(1) {
            self.next_page()?;
        }
        let markup = entry_markup(headword, forms, description);
        self.page
            .out
            .write_all(markup.as_bytes())
            .map_err(|e| KindleError::io(&self.page.path, e))?;
        self.page.entries += 1;
        self.stats.expanded_entries += 1;
        self.stats.index_size += forms.len();
        Ok(())
    }

    fn next_page(&mut self) -> Result<(), KindleError> {
        let name = page_name(self.page_names.len());
        let next = Page::open(&self.out_dir, &name)?;
        self.page_names.push(name);
        std::mem::replace(&mut self.page, next).close()
    }
}

fn page_name(index: usize) -> String {
    format!("dict{index:03}")
}

/// Write every consolidated entry as a complete Kindle book.
pub fn write_dictionary(
    dest_file: &Path,
    title: &str,
    book: &BookMetadata,
    limits: WriterLimits,
    entries: &[ConsolidatedEntry],
) -> Result<WriterStats, KindleError> {
    let mut writer = KindleWriter::create(dest_file, title, book, limits)?;
    for entry in entries {
        writer.add_entry(&entry.headword, &entry.forms, &entry.description)?;
    }
    writer.finish()
}

fn entry_markup(headword: &str, forms: &[String], description: &str) -> String {
    let mut s = String::new();
    s.push_str("  <idx:entry scriptable=\"yes\" spell=\"yes\">\n    <idx:short>\n");
    let _ = writeln!(
        s,
        "      <idx:orth value=\"{}\">{}",
        escape(forms[0].as_str()),
        headword
    );
    if forms.len() > 1 {
        s.push_str("        <idx:infl>\n");
        for form in &forms[1..] {
            let _ = writeln!(
                s,
                "          <idx:iform value=\"{}\" exact=\"yes\"/>",
                escape(form.as_str())
            );
        }
        s.push_str("        </idx:infl>\n");
    }
    s.push_str("      </idx:orth>\n");
    s.push_str(description);
    s.push_str("    </idx:short>\n  </idx:entry>\n");
    s
}

/// Render the OPF package document for the given pages.
pub fn render_opf(title: &str, book: &BookMetadata, page_names: &[String]) -> String {
    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\"?><!DOCTYPE package SYSTEM \"oeb1.ent\">\n");
    s.push_str("<package unique-identifier=\"uid\" xmlns:dc=\"Dublin Core\">\n");

    s.push_str("  <metadata>\n    <dc-metadata>\n");
    let _ = writeln!(
        s,
        "      <dc:Identifier id=\"uid\">{}</dc:Identifier>",
        escape(book.identifier.as_str())
    );
    let _ = writeln!(s, "      <dc:Title><h2>{}</h2></dc:Title>", escape(title));
    let _ = writeln!(
        s,
        "      <dc:language>{}</dc:language>",
        escape(book.out_language.as_str())
    );
    for creator in &book.creators {
        let _ = writeln!(s, "      <dc:creator>{}</dc:creator>", escape(creator.as_str()));
    }
    s.push_str("    </dc-metadata>\n");

    s.push_str("    <x-metadata>\n");
    s.push_str("      <output encoding=\"utf-8\" flatten-dynamic-dir=\"yes\"/>\n");
    let _ = writeln!(
        s,
        "      <DictionaryInLanguage>{}</DictionaryInLanguage>",
        escape(book.in_language.as_str())
    );
    let _ = writeln!(
        s,
        "      <DictionaryOutLanguage>{}</DictionaryOutLanguage>",
        escape(book.out_language.as_str())
    );
    s.push_str("    </x-metadata>\n");
    s.push_str("  </metadata>\n");

    s.push_str("  <guide>\n");
    let _ = writeln!(
        s,
        "    <reference type=\"title-page\" title=\"Title\" href=\"{}\"/>",
        escape(book.title_page.as_str())
    );
    s.push_str("  </guide>\n");

    s.push_str("  <manifest>\n");
    let _ = writeln!(
        s,
        "    <item id=\"aradict-cover\" href=\"{}\" media-type=\"image/jpeg\" properties=\"cover-image\"/>",
        escape(book.cover_image.as_str())
    );
    let _ = writeln!(
        s,
        "    <item id=\"title-page\" href=\"{}\" media-type=\"text/x-oeb1-document\"/>",
        escape(book.title_page.as_str())
    );
    for name in page_names {
        let _ = writeln!(
            s,
            "    <item id=\"{name}\" href=\"{name}.html\" media-type=\"text/x-oeb1-document\"/>"
        );
    }
    s.push_str("  </manifest>\n");

    s.push_str("  <spine toc=\"My_Table_of_Contents\">\n");
    s.push_str("    <itemref idref=\"title-page\"/>\n");
    for name in page_names {
        let _ = writeln!(s, "    <itemref idref=\"{name}\"/>");
    }
    s.push_str("  </spine>\n");
    s.push_str("</package>\n");
    s
}

use async_trait::async_trait;
use epubcore::{Book, BookRef, ContentDownloader, DownloadError, EpubReaderOptions, EpubResult};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// Empty metadata, a single `nav` item, an empty spine and an empty nav document.
const MINIMAL_PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="3.0" xmlns="http://www.idpf.org/2007/opf">
  <metadata/>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
  </manifest>
  <spine/>
</package>"#;

const MINIMAL_NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <head><title>Navigation</title></head>
  <body/>
</html>"#;

const EPUB2_PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" unique-identifier="uid" xmlns="http://www.idpf.org/2007/opf">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>Example Book</dc:title>
    <dc:creator opf:role="aut">First Author</dc:creator>
    <dc:creator opf:role="aut">Second Author</dc:creator>
    <dc:description>A book used in tests.</dc:description>
    <dc:identifier id="uid">urn:uuid:0000</dc:identifier>
    <meta name="cover" content="cover-image"/>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="c3" href="text/chapter3.xhtml" media-type="application/xhtml+xml"/>
    <item id="c1" href="text/chapter1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
    <item id="style" href="style/main.css" media-type="text/css"/>
    <item id="cover-image" href="images/cover.png" media-type="image/png"/>
    <item id="font" href="fonts/serif.otf" media-type="font/otf"/>
    <item id="remote" href="https://example.com/remote.png" media-type="image/png"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="c1"/>
    <itemref idref="c2" linear="no"/>
    <itemref idref="c3"/>
  </spine>
  <guide>
    <reference type="text" title="Start" href="text/chapter1.xhtml"/>
  </guide>
</package>"#;

const EPUB2_NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:0000"/>
  </head>
  <docTitle><text>Example Book</text></docTitle>
  <docAuthor><text>First Author</text></docAuthor>
  <navMap>
    <navPoint id="p1" playOrder="1">
      <navLabel><text>Chapter 1</text></navLabel>
      <content src="text/chapter1.xhtml"/>
      <navPoint id="p1-1" playOrder="2">
        <navLabel><text>Section 1.1</text></navLabel>
        <content src="text/chapter1.xhtml#s1"/>
        <navPoint id="p1-1-1" playOrder="3">
          <navLabel><text>Section 1.1.1</text></navLabel>
          <content src="text/chapter1.xhtml#s1-1"/>
        </navPoint>
      </navPoint>
    </navPoint>
    <navPoint id="p2" playOrder="4">
      <navLabel><text>Chapter 2</text></navLabel>
      <content src="text/chapter%202.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

pub const REMOTE_IMAGE: &str = "https://example.com/remote.png";

/// Serves every URL as its own bytes, or fails every request.
pub struct StubDownloader {
    pub fail: bool,
}

impl StubDownloader {
    pub fn options(fail: bool) -> EpubReaderOptions {
        EpubReaderOptions::new()
            .download_content(true)
            .content_downloader(Self { fail })
    }
}

#[async_trait]
impl ContentDownloader for StubDownloader {
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        if self.fail {
            return Err(format!("connection refused: {url}").into());
        }
        Ok(url.as_bytes().to_vec())
    }
}

fn chapter(body: &str) -> String {
    format!("<html><body>{body}</body></html>")
}

/// In-memory EPUB archive assembled entry by entry.
#[derive(Clone, Default)]
pub struct TestEpub {
    entries: Vec<(String, Vec<u8>)>,
}

impl TestEpub {
    /// The smallest valid EPUB 3 book.
    pub fn minimal() -> Self {
        Self::default()
            .entry("mimetype", "application/epub+zip")
            .entry("META-INF/container.xml", CONTAINER)
            .entry("OEBPS/content.opf", MINIMAL_PACKAGE)
            .entry("OEBPS/nav.xhtml", MINIMAL_NAV)
    }

    /// An EPUB 2 book with an NCX, three chapters, a stylesheet, a cover and a remote image.
    pub fn epub2() -> Self {
        Self::default()
            .entry("mimetype", "application/epub+zip")
            .entry("META-INF/container.xml", CONTAINER)
            .entry("OEBPS/content.opf", EPUB2_PACKAGE)
            .entry("OEBPS/toc.ncx", EPUB2_NCX)
            .entry("OEBPS/text/chapter1.xhtml", chapter("One"))
            .entry("OEBPS/text/chapter 2.xhtml", chapter("Two"))
            .entry("OEBPS/text/chapter3.xhtml", chapter("Three"))
            .entry("OEBPS/style/main.css", "body { margin: 0; }")
            .entry("OEBPS/images/cover.png", [0x89, b'P', b'N', b'G'])
            .entry("OEBPS/fonts/serif.otf", [0, 1, 0, 0])
    }

    /// Adds or replaces the entry at `path`.
    pub fn entry(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries.retain(|(existing, _)| existing != path);
        self.entries.push((path.to_owned(), content.as_ref().to_vec()));
        self
    }

    pub fn without(mut self, path: &str) -> Self {
        self.entries.retain(|(existing, _)| existing != path);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (path, content) in &self.entries {
            writer.start_file(path.as_str(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Writes the archive to a temporary `.epub` file, deleted once dropped.
    pub fn to_file(&self) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".epub").tempfile().unwrap();
        file.write_all(&self.to_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn read(&self) -> EpubResult<Book> {
        self.read_with(EpubReaderOptions::new())
    }

    pub fn read_with(&self, options: EpubReaderOptions) -> EpubResult<Book> {
        options.read_book_from(Cursor::new(self.to_bytes()))
    }

    pub fn open(&self) -> EpubResult<BookRef> {
        self.open_with(EpubReaderOptions::new())
    }

    pub fn open_with(&self, options: EpubReaderOptions) -> EpubResult<BookRef> {
        options.open_book_from(Cursor::new(self.to_bytes()))
    }
}

use crate::epub::util::{CONTAINER, TestEpub};
use epubcore::errors::{ContainerError, NavigationError, PackageError};
use epubcore::{Book, BookRef, EpubError, EpubReaderOptions};

const DUPLICATE_HREF_PACKAGE: &str = r#"<package version="3.0" xmlns="http://www.idpf.org/2007/opf">
  <metadata/>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="a" href="text/a.xhtml" media-type="application/xhtml+xml"/>
    <item id="b" href="text/a.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine/>
</package>"#;

const BROKEN_SPINE_PACKAGE: &str = r#"<package version="3.0" xmlns="http://www.idpf.org/2007/opf">
  <metadata/>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="css" href="style.css" media-type="text/css"/>
  </manifest>
  <spine>
    <itemref idref="nav"/>
    <itemref idref="missing"/>
    <itemref idref="css"/>
  </spine>
</package>"#;

const NO_NAV_PACKAGE: &str = r#"<package version="3.0" xmlns="http://www.idpf.org/2007/opf">
  <metadata/>
  <manifest>
    <item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine><itemref idref="c1"/></spine>
</package>"#;

#[test]
fn test_not_found() {
    let path = "tests/missing/book.epub";

    assert!(matches!(
        Book::read(path),
        Err(EpubError::NotFound { path: missing, .. }) if missing.ends_with("book.epub")
    ));
    assert!(matches!(BookRef::open(path), Err(EpubError::NotFound { .. })));
}

#[tokio::test]
async fn test_not_found_async() {
    let path = "tests/missing/book.epub";

    assert!(matches!(
        Book::read_async(path).await,
        Err(EpubError::NotFound { .. })
    ));
    assert!(matches!(
        BookRef::open_async(path).await,
        Err(EpubError::NotFound { .. })
    ));
}

#[test]
fn test_unreadable_archive() {
    let result =
        EpubReaderOptions::new().read_book_from(std::io::Cursor::new(b"not a zip".to_vec()));

    assert!(matches!(result, Err(EpubError::Archive(_))));
}

#[test]
fn test_missing_container() {
    let epub = TestEpub::minimal().without("META-INF/container.xml");

    assert!(matches!(
        epub.read(),
        Err(EpubError::Container(ContainerError::MissingContainerFile))
    ));
    assert!(matches!(
        epub.open(),
        Err(EpubError::Container(ContainerError::MissingContainerFile))
    ));
}

#[test]
fn test_missing_package() {
    let epub = TestEpub::minimal().without("OEBPS/content.opf");

    assert!(matches!(
        epub.read(),
        Err(EpubError::Container(ContainerError::MissingPackageFile(path))) if path == "OEBPS/content.opf"
    ));

    let no_root_file = TestEpub::minimal().entry(
        "META-INF/container.xml",
        CONTAINER.replace("<rootfile ", "<other "),
    );
    assert!(matches!(
        no_root_file.open(),
        Err(EpubError::Container(ContainerError::NoRootFile))
    ));
}

#[test]
fn test_duplicate_href() {
    let epub = TestEpub::minimal()
        .entry("OEBPS/content.opf", DUPLICATE_HREF_PACKAGE)
        .entry("OEBPS/text/a.xhtml", "<html/>");

    for result in [epub.read().map(|_| ()), epub.open().map(|_| ())] {
        assert!(matches!(
            result,
            Err(EpubError::Package(PackageError::DuplicateContent { value, .. })) if value == "text/a.xhtml"
        ));
    }
}

#[test]
fn test_spine_leniency() {
    let epub = TestEpub::minimal()
        .entry("OEBPS/content.opf", BROKEN_SPINE_PACKAGE)
        .entry("OEBPS/style.css", "");

    assert!(matches!(
        epub.read(),
        Err(EpubError::Package(PackageError::InvalidIdref(idref))) if idref == "missing"
    ));

    // The lazy model only resolves the spine on demand
    let book_ref = epub.open().unwrap();
    assert!(matches!(
        book_ref.reading_order(),
        Err(EpubError::Package(PackageError::InvalidIdref(_)))
    ));

    let book = epub
        .read_with(EpubReaderOptions::new().ignore_missing_spine_items(true))
        .unwrap();
    let idrefs = book.reading_order.iter().map(|item| item.idref.as_str());
    assert_eq!(vec!["nav"], idrefs.collect::<Vec<_>>());
}

#[test]
fn test_missing_toc_leniency() {
    let epub = TestEpub::minimal()
        .entry("OEBPS/content.opf", NO_NAV_PACKAGE)
        .entry("OEBPS/c1.xhtml", "<html/>");

    assert!(matches!(
        epub.read(),
        Err(EpubError::Navigation(NavigationError::NoNavItem))
    ));

    let book = epub
        .read_with(EpubReaderOptions::new().ignore_missing_toc(true))
        .unwrap();
    assert!(book.navigation.is_none());
    assert_eq!(1, book.reading_order.len());
}

#[test]
fn test_malformed_xml() {
    let epub =
        TestEpub::minimal().entry("OEBPS/content.opf", "<package version=\"3.0\"><metadata>");

    assert!(matches!(
        epub.read(),
        Err(EpubError::Unparsable { file, .. }) if file == "OEBPS/content.opf"
    ));
}

use crate::epub::util::TestEpub;
use epubcore::errors::NavigationError;
use epubcore::{EpubError, EpubNavigationItemType, EpubReaderOptions};

const EPUB3_PACKAGE: &str = r#"<package version="3.0" xmlns="http://www.idpf.org/2007/opf">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Navigable</dc:title>
  </metadata>
  <manifest>
    <item id="nav" href="nav/nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="c1" href="text/c1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/c2.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
</package>"#;

const EPUB3_NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <body>
    <nav epub:type="landmarks">
      <ol><li><a epub:type="bodymatter" href="../text/c1.xhtml">Start</a></li></ol>
    </nav>
    <nav epub:type="toc">
      <h1>Contents</h1>
      <ol>
        <li>
          <span>Part I</span>
          <ol>
            <li><a href="../text/c1.xhtml">Chapter 1</a></li>
            <li>
              <a href="../text/c2.xhtml#start">Chapter 2</a>
              <ol><li><a href="../text/c2.xhtml#end">Epilogue</a></li></ol>
            </li>
          </ol>
        </li>
        <li><a href="../text/missing.xhtml">Missing</a></li>
      </ol>
    </nav>
  </body>
</html>"#;

fn epub3() -> TestEpub {
    TestEpub::minimal()
        .without("OEBPS/nav.xhtml")
        .entry("OEBPS/content.opf", EPUB3_PACKAGE)
        .entry("OEBPS/nav/nav.xhtml", EPUB3_NAV)
        .entry("OEBPS/text/c1.xhtml", "<html>1</html>")
        .entry("OEBPS/text/c2.xhtml", "<html>2</html>")
}

#[test]
fn test_nav_tree() {
    let book = epub3().read().unwrap();
    let navigation = book.navigation.unwrap();
    assert_eq!(2, navigation.len());

    let part = &navigation[0];
    assert_eq!(EpubNavigationItemType::Header, part.item_type);
    assert_eq!("Part I", part.title);
    assert!(part.link.is_none());
    assert!(part.html_content_file.is_none());

    let titles = part.nested_items.iter().map(|item| item.title.as_str());
    assert_eq!(vec!["Chapter 1", "Chapter 2"], titles.collect::<Vec<_>>());

    let chapter2 = &part.nested_items[1];
    let link = chapter2.link.as_ref().unwrap();
    assert_eq!("../text/c2.xhtml", link.content_file_name);
    assert_eq!("OEBPS/text/c2.xhtml", link.content_file_path);
    assert_eq!(Some("start"), link.anchor.as_deref());
    let html = chapter2.html_content_file.as_ref().unwrap();
    assert_eq!("<html>2</html>", html.content().as_str());

    let epilogue = &chapter2.nested_items[0];
    let link = epilogue.link.as_ref().unwrap();
    assert_eq!(Some("end"), link.anchor.as_deref());
    assert!(epilogue.nested_items.is_empty());

    // Unresolved targets are kept without content by default
    let missing = &navigation[1];
    assert_eq!(EpubNavigationItemType::Link, missing.item_type);
    assert_eq!(
        "OEBPS/text/missing.xhtml",
        missing.link.as_ref().unwrap().content_file_path
    );
    assert!(missing.html_content_file.is_none());
}

#[test]
fn test_nav_document_schema() {
    let book = epub3().read().unwrap();
    let document = book.schema.epub3_nav_document.as_ref().unwrap();

    assert_eq!("OEBPS/nav/nav.xhtml", document.file_path);
    assert_eq!(2, document.navs.len());
    assert_eq!(
        "nav/nav.xhtml",
        book.content.navigation_html_file.as_ref().unwrap().key()
    );
}

#[test]
fn test_missing_navigation_content() {
    let options = EpubReaderOptions::new().ignore_missing_content_for_navigation_points(false);

    assert!(matches!(
        epub3().read_with(options.clone()),
        Err(EpubError::Navigation(NavigationError::MissingContent(path))) if path == "OEBPS/text/missing.xhtml"
    ));

    let book_ref = epub3().open_with(options).unwrap();
    assert!(matches!(
        book_ref.navigation(),
        Err(EpubError::Navigation(NavigationError::MissingContent(_)))
    ));
}

#[test]
fn test_ncx_tree() {
    let book = TestEpub::epub2().read().unwrap();
    let navigation = book.navigation.unwrap();

    let titles = navigation.iter().map(|item| item.title.as_str());
    assert_eq!(vec!["Chapter 1", "Chapter 2"], titles.collect::<Vec<_>>());

    // Three levels deep
    let mut item = &navigation[0];
    for (title, anchor) in [("Section 1.1", "s1"), ("Section 1.1.1", "s1-1")] {
        assert_eq!(1, item.nested_items.len());
        item = &item.nested_items[0];

        let link = item.link.as_ref().unwrap();
        assert_eq!(title, item.title);
        assert_eq!(Some(anchor), link.anchor.as_deref());
        assert_eq!("OEBPS/text/chapter1.xhtml", link.content_file_path);
    }
    assert!(item.nested_items.is_empty());

    // Percent-encoded hrefs resolve to decoded archive paths
    let chapter2 = &navigation[1];
    assert_eq!(
        "OEBPS/text/chapter 2.xhtml",
        chapter2.html_content_file.as_ref().unwrap().file_path()
    );
}

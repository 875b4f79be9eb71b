use crate::epub::util::{REMOTE_IMAGE, StubDownloader, TestEpub};
use epubcore::content::{EpubContentType, LocalContent, RemoteContent};
use epubcore::schema::EpubVersion;
use epubcore::{Book, EpubError, EpubReaderOptions};

#[test]
fn test_minimal_book_defaults() {
    let book = TestEpub::minimal().read().unwrap();

    assert_eq!(EpubVersion::Epub3, book.schema.package.version);
    assert_eq!("", book.title);
    assert_eq!("", book.author);
    assert!(book.author_list.is_empty());
    assert!(book.description.is_none());
    assert!(book.file_path.is_none());
    assert!(book.cover_image.is_none());
    assert!(book.reading_order.is_empty());
    assert!(book.schema.epub2_ncx.is_none());
    assert!(book.navigation.unwrap().is_empty());

    let content = &book.content;
    assert_eq!(1, content.html.len());
    assert_eq!(1, content.all_files.len());
    assert!(content.html.contains_local_by_key("nav.xhtml"));
    assert!(content.all_files.contains_local_by_file_path("OEBPS/nav.xhtml"));
    assert_eq!(
        "nav.xhtml",
        content.navigation_html_file.as_ref().unwrap().key()
    );
    assert!(content.css.is_empty());
    assert!(content.images.is_empty());
    assert!(content.fonts.is_empty());
    assert!(content.audio.is_empty());
}

#[test]
fn test_epub2_book() {
    let book = TestEpub::epub2().read().unwrap();

    assert_eq!(EpubVersion::Epub2, book.schema.package.version);
    assert_eq!("Example Book", book.title);
    assert_eq!("First Author, Second Author", book.author);
    assert_eq!(vec!["First Author", "Second Author"], book.author_list);
    assert_eq!(Some("A book used in tests."), book.description.as_deref());
    assert_eq!(Some(vec![0x89, b'P', b'N', b'G']), book.cover_image);
    assert_eq!("OEBPS", book.schema.content_directory_path);
    assert!(book.content.navigation_html_file.is_none());
    assert!(book.schema.epub3_nav_document.is_none());

    let ncx = book.schema.epub2_ncx.as_ref().unwrap();
    assert_eq!("OEBPS/toc.ncx", ncx.file_path);
    assert_eq!(Some("Example Book"), ncx.doc_title.as_deref());
    assert_eq!(vec!["First Author"], ncx.doc_authors);
}

#[test]
fn test_reading_order() {
    let book = TestEpub::epub2().read().unwrap();
    let reading_order = book
        .reading_order
        .iter()
        .map(|item| {
            (
                item.idref.as_str(),
                item.file.file_path(),
                item.is_linear,
                item.file.content().as_str(),
            )
        })
        .collect::<Vec<_>>();

    #[rustfmt::skip]
    let expected = vec![
        ("c1", "OEBPS/text/chapter1.xhtml", true, "<html><body>One</body></html>"),
        ("c2", "OEBPS/text/chapter 2.xhtml", false, "<html><body>Two</body></html>"),
        ("c3", "OEBPS/text/chapter3.xhtml", true, "<html><body>Three</body></html>"),
    ];
    assert_eq!(expected, reading_order);
}

#[test]
fn test_content_classification() {
    let book = TestEpub::epub2().read().unwrap();
    let content = &book.content;

    assert_eq!(3, content.html.len());
    let css = content.css.get_local_by_key("style/main.css").unwrap();
    assert_eq!("body { margin: 0; }", css.content().as_str());
    assert_eq!(
        EpubContentType::FontOpentype,
        content.fonts.local()[0].content_type()
    );

    // The cover is shared with the image collection
    let cover = content.cover.as_ref().unwrap();
    assert_eq!("OEBPS/images/cover.png", cover.file_path());
    assert_eq!(cover.content(), content.images.local()[0].content());

    // Remote content is left unfetched without a downloader
    let remote = content
        .images
        .get_remote_by_url("https://example.com/remote.png")
        .unwrap();
    assert_eq!("https://example.com/remote.png", remote.key());
    assert!(remote.content().is_none());

    // Every manifest item, in manifest order
    let keys = content
        .all_files
        .local()
        .iter()
        .map(|file| file.key())
        .collect::<Vec<_>>();
    #[rustfmt::skip]
    let expected = [
        "toc.ncx", "text/chapter3.xhtml", "text/chapter1.xhtml", "text/chapter 2.xhtml",
        "style/main.css", "images/cover.png", "fonts/serif.otf",
    ];
    assert_eq!(expected.to_vec(), keys);
    assert_eq!(
        vec!["https://example.com/remote.png"],
        content
            .all_files
            .remote()
            .iter()
            .map(|file| file.url())
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_read_from_path() {
    let file = TestEpub::epub2().to_file();
    let book = Book::read(file.path()).unwrap();

    assert_eq!(Some(file.path()), book.file_path.as_deref());
    assert_eq!("Example Book", book.title);
}

#[tokio::test]
async fn test_read_async() {
    let file = TestEpub::epub2().to_file();
    let from_path = Book::read_async(file.path()).await.unwrap();
    let from_reader = EpubReaderOptions::new()
        .read_book_from_async(std::io::Cursor::new(TestEpub::epub2().to_bytes()))
        .await
        .unwrap();

    assert_eq!(from_path.schema, from_reader.schema);
    assert_eq!(from_path.cover_image, from_reader.cover_image);
}

#[test]
fn test_download_content() {
    let book = TestEpub::epub2()
        .read_with(StubDownloader::options(false))
        .unwrap();
    let remote = book.content.images.get_remote_by_url(REMOTE_IMAGE).unwrap();

    assert_eq!(&Some(REMOTE_IMAGE.as_bytes().to_vec()), remote.content());
    assert_eq!(1, book.content.all_files.remote().len());
}

#[test]
fn test_download_requires_opt_in() {
    let options = EpubReaderOptions::new()
        .content_downloader(StubDownloader { fail: true });
    let book = TestEpub::epub2().read_with(options).unwrap();

    let remote = book.content.images.get_remote_by_url(REMOTE_IMAGE).unwrap();

    assert!(remote.content().is_none());
}

#[test]
fn test_download_failure() {
    assert!(matches!(
        TestEpub::epub2().read_with(StubDownloader::options(true)),
        Err(EpubError::Download { url, .. }) if url == REMOTE_IMAGE
    ));
}

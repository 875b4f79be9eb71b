use crate::epub::util::{REMOTE_IMAGE, StubDownloader, TestEpub};
use epubcore::content::LocalContent;
use epubcore::errors::ArchiveError;
use epubcore::{BookRef, EpubError, EpubReaderOptions};

#[test]
fn test_lazy_matches_eager() {
    let epub = TestEpub::epub2();
    let book = epub.read().unwrap();
    let book_ref = epub.open().unwrap();

    assert_eq!(book.schema, book_ref.schema);
    assert_eq!(book.title, book_ref.title);
    assert_eq!(book.author_list, book_ref.author_list);
    assert_eq!(book.description, book_ref.description);
    assert_eq!(book.cover_image, book_ref.read_cover().unwrap());

    let reading_order = book_ref.reading_order().unwrap();
    assert_eq!(book.reading_order.len(), reading_order.len());
    for (eager, lazy) in book.reading_order.iter().zip(&reading_order) {
        assert_eq!(eager.idref, lazy.idref);
        assert_eq!(eager.is_linear, lazy.is_linear);
        assert_eq!(eager.file.file_path(), lazy.file.file_path());
        assert_eq!(*eager.file.content(), lazy.file.read_content().unwrap());
    }

    let eager_keys = book.content.all_files.local().iter().map(|file| file.key());
    let lazy_keys = book_ref.content.all_files.local();
    let lazy_keys = lazy_keys.iter().map(|file| file.key());
    assert!(eager_keys.eq(lazy_keys));

    let eager_navigation = book.navigation.unwrap();
    let lazy_navigation = book_ref.navigation().unwrap().unwrap();
    assert_eq!(eager_navigation.len(), lazy_navigation.len());
    for (eager, lazy) in eager_navigation.iter().zip(&lazy_navigation) {
        assert_eq!(eager.title, lazy.title);
        assert_eq!(eager.link, lazy.link);
        assert_eq!(eager.nested_items.len(), lazy.nested_items.len());
    }
}

#[test]
fn test_lazy_reads_are_deferred() {
    // The stylesheet is referenced although its entry is absent
    let book = TestEpub::epub2()
        .without("OEBPS/style/main.css")
        .open()
        .unwrap();
    let css = book.content.css.get_local_by_key("style/main.css").unwrap();

    assert!(matches!(
        css.read_content(),
        Err(EpubError::Archive(ArchiveError::MissingEntry { path })) if path == "OEBPS/style/main.css"
    ));
    let eager = TestEpub::epub2().without("OEBPS/style/main.css").read();
    assert!(eager.is_err());
}

#[test]
fn test_remote_content_without_downloader() {
    let book = TestEpub::epub2().open().unwrap();
    let remote = book
        .content
        .images
        .get_remote_by_url("https://example.com/remote.png")
        .unwrap();

    assert!(matches!(
        remote.read_content(),
        Err(EpubError::DownloadDisabled { url }) if url == "https://example.com/remote.png"
    ));
}

#[test]
fn test_remote_content_with_downloader() {
    let book = TestEpub::epub2()
        .open_with(StubDownloader::options(false))
        .unwrap();
    let remote = book.content.images.get_remote_by_url(REMOTE_IMAGE).unwrap();

    assert_eq!(REMOTE_IMAGE.as_bytes(), remote.read_content().unwrap());

    let failing = TestEpub::epub2()
        .open_with(StubDownloader::options(true))
        .unwrap();
    let remote = failing.content.images.get_remote_by_url(REMOTE_IMAGE);
    let remote = remote.unwrap();
    assert!(matches!(
        remote.read_content(),
        Err(EpubError::Download { url, .. }) if url == REMOTE_IMAGE
    ));
}

#[tokio::test]
async fn test_remote_content_with_downloader_async() {
    let book = TestEpub::epub2()
        .open_with(StubDownloader::options(false))
        .unwrap();
    let remote = book.content.images.remote()[0].clone();

    // Remote reads stay available after the archive is released
    book.dispose();
    let bytes = remote.read_content_async().await.unwrap();
    assert_eq!(REMOTE_IMAGE.as_bytes(), bytes);
}

#[test]
fn test_dispose() {
    let book = TestEpub::epub2().open().unwrap();
    let chapter = book.content.html.get_local_by_key("text/chapter1.xhtml");
    let chapter = chapter.unwrap().clone();

    assert!(!book.is_disposed());
    let html = chapter.read_content().unwrap();
    assert_eq!("<html><body>One</body></html>", html);

    book.dispose();
    // Idempotent
    book.dispose();

    assert!(book.is_disposed());
    assert!(matches!(
        chapter.read_content(),
        Err(EpubError::Archive(ArchiveError::Disposed))
    ));
    assert!(matches!(
        book.read_cover(),
        Err(EpubError::Archive(ArchiveError::Disposed))
    ));
    assert!(matches!(
        book.reading_order(),
        Err(EpubError::Archive(ArchiveError::Disposed))
    ));

    // Dropping the book releases the archive shared with outstanding references
    let book = TestEpub::epub2().open().unwrap();
    let chapter = book.content.html.get_local_by_key("text/chapter1.xhtml");
    let chapter = chapter.unwrap().clone();
    drop(book);
    assert!(matches!(
        chapter.read_content(),
        Err(EpubError::Archive(ArchiveError::Disposed))
    ));
}

#[test]
fn test_open_from_path() {
    let file = TestEpub::epub2().to_file();
    let book = BookRef::open(file.path()).unwrap();

    assert_eq!(Some(file.path()), book.file_path.as_deref());
    assert_eq!(3, book.reading_order().unwrap().len());
}

#[tokio::test]
async fn test_open_async() {
    let file = TestEpub::epub2().to_file();
    let book = EpubReaderOptions::strict()
        .open_book_async(file.path())
        .await
        .unwrap();

    assert_eq!("Example Book", book.title);
    assert!(book.read_cover_async().await.unwrap().is_some());
    assert_eq!(3, book.reading_order_async().await.unwrap().len());

    let navigation = book.navigation_async().await.unwrap().unwrap();
    assert_eq!("Chapter 1", navigation[0].title);

    let chapter = navigation[0].html_content_file.as_ref().unwrap();
    assert_eq!(
        "<html><body>One</body></html>",
        chapter.read_content_async().await.unwrap()
    );
}

use super::*;

fn file(name: &str) -> ExportFile {
    ExportFile {
        name: name.to_string(),
        mime: "image/png",
        bytes: vec![1, 2, 3],
    }
}

#[test]
fn filenames_embed_timestamp() {
    assert_eq!(download_filename(1_700_000_000_123), "lumina-photo-1700000000123.png");
    assert_ne!(download_filename(1), download_filename(2));
}

#[test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.now_millis() > 1_577_836_800_000);
}

#[tokio::test]
async fn directory_sink_writes_download() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path().join("out"));
    sink.download(file("lumina-photo-1.png")).await.unwrap();
    assert_eq!(
        std::fs::read(dir.path().join("out").join("lumina-photo-1.png")).unwrap(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn directory_sink_without_outbox_cannot_share() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    assert_eq!(
        sink.share(file(SHARE_FILE_NAME), &ShareMeta::default()).await,
        ShareOutcome::Unsupported
    );
}

#[tokio::test]
async fn directory_sink_shares_into_outbox_with_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let outbox = dir.path().join("outbox");
    let sink = DirectorySink::new(dir.path()).with_outbox(&outbox);
    let outcome = sink
        .share(file(SHARE_FILE_NAME), &ShareMeta::default())
        .await;
    assert_eq!(outcome, ShareOutcome::Shared);
    assert!(outbox.join(SHARE_FILE_NAME).is_file());

    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(outbox.join("share.json")).unwrap()).unwrap();
    assert_eq!(manifest["title"], SHARE_TITLE);
    assert_eq!(manifest["files"][0], SHARE_FILE_NAME);
}

#[tokio::test]
async fn in_memory_sink_records_calls() {
    let sink = InMemorySink::with_share_outcome(ShareOutcome::Shared);
    sink.download(file("a.png")).await.unwrap();
    assert_eq!(
        sink.share(file("b.png"), &ShareMeta::default()).await,
        ShareOutcome::Shared
    );
    assert_eq!(sink.downloads().len(), 1);
    assert_eq!(sink.shares()[0].1.title, SHARE_TITLE);

    let no_share = InMemorySink::new();
    assert_eq!(
        no_share.share(file("c.png"), &ShareMeta::default()).await,
        ShareOutcome::Unsupported
    );
    assert!(no_share.shares().is_empty());
}

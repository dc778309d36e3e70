//! 整合測試 - 在暫存目錄中以實體檔案驗證三個批次工作

use std::fs;
use std::path::Path;

use quiz_media_sync::component::media_field_rewriter::RecordRewriter;
use quiz_media_sync::component::media_renamer::HashedRenamer;
use quiz_media_sync::component::missing_media_checker::{MediaReconciler, ReferenceStatus};
use quiz_media_sync::tools::{DiskStore, normalize};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// 測試 1: 引用的檔案在媒體子資料夾中，應移到 exists
#[test]
fn test_reconcile_moves_found_file() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    let media_name = normalize("clip1.mp4");
    assert_eq!(media_name, "c99dd2f060.mp4");

    write(
        &base.join("kategorie-json/a.json"),
        &format!(r#"[{{"id": 1, "media": "{media_name}"}}]"#),
    );
    write(&base.join("media-section/sub").join(&media_name), "video");

    let store = DiskStore::new();
    let report = MediaReconciler::new(
        &store,
        base.join("kategorie-json"),
        base.join("media-section"),
        base.join("exists"),
    )
    .reconcile();

    assert!(report.missing().is_empty());
    assert_eq!(report.moved(), 1);
    assert_eq!(
        fs::read_to_string(base.join("exists").join(&media_name)).unwrap(),
        "video"
    );
    assert!(!base.join("media-section/sub").join(&media_name).exists());
}

/// 測試 2: 哪裡都找不到的檔案只回報缺漏
#[test]
fn test_reconcile_reports_missing() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    write(&base.join("kategorie-json/a.json"), r#"[{"media": "ghost.mp4"}]"#);
    fs::create_dir_all(base.join("media-section")).unwrap();

    let store = DiskStore::new();
    let report = MediaReconciler::new(
        &store,
        base.join("kategorie-json"),
        base.join("media-section"),
        base.join("exists"),
    )
    .reconcile();

    assert_eq!(report.missing(), vec!["ghost.mp4"]);
    assert_eq!(report.references[0].status, ReferenceStatus::Missing);
    assert!(!base.join("exists").exists());
}

/// 測試 3: exists 中已有檔案時不搜尋也不移動
#[test]
fn test_reconcile_already_present() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    write(&base.join("kategorie-json/a.json"), r#"[{"media": "done.jpg"}]"#);
    write(&base.join("exists/done.jpg"), "found earlier");
    write(&base.join("media-section/done.jpg"), "duplicate copy");

    let store = DiskStore::new();
    let report = MediaReconciler::new(
        &store,
        base.join("kategorie-json"),
        base.join("media-section"),
        base.join("exists"),
    )
    .reconcile();

    assert_eq!(report.already_present(), 1);
    assert_eq!(report.moved(), 0);
    assert_eq!(
        fs::read_to_string(base.join("exists/done.jpg")).unwrap(),
        "found earlier"
    );
    assert!(base.join("media-section/done.jpg").exists());
}

/// 測試 4: 同名衝突時第一個檔案保留新名稱，第二個維持原狀
#[test]
fn test_renamer_collision_keeps_both_files() {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media-section");

    write(&media.join("a.JPG"), "upper");
    write(&media.join("a.jpg"), "lower");

    let store = DiskStore::new();
    let extensions = vec![".jpg".to_string(), ".mp4".to_string()];
    let report = HashedRenamer::new(&store, &extensions).rename_all(&media);

    assert_eq!(report.renamed(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(fs::read_dir(&media).unwrap().count(), 2);
    assert_eq!(
        fs::read_to_string(media.join("86f7e437fa.jpg")).unwrap(),
        "upper"
    );
    assert_eq!(fs::read_to_string(media.join("a.jpg")).unwrap(), "lower");
}

/// 測試 5: 改寫只影響 media 欄位
#[test]
fn test_rewriter_preserves_other_fields() {
    let temp_dir = TempDir::new().unwrap();
    let json_dir = temp_dir.path().join("kategorie-json");

    let original = r#"[
  {
    "id": 42,
    "questionNumber": 3,
    "question": {
      "pl": "Czy wolno?",
      "en": "Is it allowed?"
    },
    "answers": [
      {
        "id": "A",
        "text": {
          "pl": "Tak"
        }
      }
    ],
    "correctAnswer": "A",
    "media": "KW_D16_354org.mp4",
    "categories": [
      "B"
    ],
    "type": "basic",
    "points": 3,
    "legalBasis": [],
    "additionalDescription": "",
    "extraField": true
  }
]"#;
    write(&json_dir.join("b.json"), original);

    let store = DiskStore::new();
    let report = RecordRewriter::new(&store).rewrite_all(&json_dir);

    assert_eq!(report.files_updated(), 1);
    assert_eq!(
        fs::read_to_string(json_dir.join("b.json")).unwrap(),
        original.replace("KW_D16_354org.mp4", "5f87595962.mp4")
    );
}

/// 測試 6: 解析失敗的檔案不會被覆寫
#[test]
fn test_rewriter_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let json_dir = temp_dir.path().join("kategorie-json");

    write(&json_dir.join("bad.json"), "{ \"media\": ");
    write(&json_dir.join("good.json"), r#"[{"media": "a.mp4"}]"#);

    let store = DiskStore::new();
    let report = RecordRewriter::new(&store).rewrite_all(&json_dir);

    assert_eq!(report.errors(), 1);
    assert_eq!(report.files_updated(), 1);
    assert_eq!(
        fs::read_to_string(json_dir.join("bad.json")).unwrap(),
        "{ \"media\": "
    );
    assert!(
        fs::read_to_string(json_dir.join("good.json"))
            .unwrap()
            .contains("86f7e437fa.mp4")
    );
}

/// 測試 7: 媒體資料夾中的符號連結視同檔案，改名與比對都會處理
#[cfg(unix)]
#[test]
fn test_symlinked_media_is_renamed_and_moved() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    write(&base.join("storage/clip1.mp4"), "video");
    fs::create_dir_all(base.join("media-section/sub")).unwrap();
    symlink(
        base.join("storage/clip1.mp4"),
        base.join("media-section/sub/clip1.mp4"),
    )
    .unwrap();

    let store = DiskStore::new();
    let extensions = vec![".mp4".to_string()];
    let rename_report = HashedRenamer::new(&store, &extensions).rename_all(&base.join("media-section"));

    assert_eq!(rename_report.renamed(), 1);
    let renamed = base.join("media-section/sub/c99dd2f060.mp4");
    assert!(fs::symlink_metadata(&renamed).unwrap().file_type().is_symlink());

    write(&base.join("kategorie-json/a.json"), r#"[{"media": "c99dd2f060.mp4"}]"#);
    let report = MediaReconciler::new(
        &store,
        base.join("kategorie-json"),
        base.join("media-section"),
        base.join("exists"),
    )
    .reconcile();

    assert!(report.missing().is_empty());
    assert_eq!(report.moved(), 1);
    assert!(!renamed.exists());
    assert_eq!(
        fs::read_to_string(base.join("exists/c99dd2f060.mp4")).unwrap(),
        "video"
    );
}

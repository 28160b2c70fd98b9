use storycraft_core::{
    AppConfig, ImportError, MemoryKvStore, SceneDraft, SceneStatus, StorageError, StoryCraft,
};

fn novel_a(app: &mut StoryCraft<MemoryKvStore>) -> String {
    let project_id = app.create_project("Novel A", "A sea story").unwrap();
    let chapter_id = app
        .edit_chapters(&project_id, |planner| planner.add_chapter("Ch.1", 2000, 0))
        .flatten()
        .unwrap();
    let scene_id = app
        .edit_chapters(&project_id, |planner| {
            planner.save_scene(&chapter_id, SceneDraft::new("Opening"))
        })
        .flatten()
        .unwrap();
    let mira = app
        .edit_characters(&project_id, |registry| registry.add("Mira", "", "pilot"))
        .flatten()
        .unwrap();
    let linked = app
        .edit_chapters(&project_id, |planner| {
            planner.toggle_scene_character(&chapter_id, &scene_id, &mira)
        })
        .flatten();
    assert_eq!(linked, Some(true));
    project_id
}

#[test]
fn export_then_import_restores_the_same_project() {
    let mut app = StoryCraft::load(MemoryKvStore::new());
    let project_id = novel_a(&mut app);
    let before = app.project(&project_id).unwrap().clone();
    assert_eq!(before.chapters[0].scenes[0].status, SceneStatus::Planning);

    let json = app.export_json().unwrap();

    let mut fresh = StoryCraft::load(MemoryKvStore::new());
    assert_eq!(fresh.import_json(&json).unwrap(), 1);
    assert_eq!(fresh.projects(), std::slice::from_ref(&before));

    let restored = fresh.project(&project_id).unwrap();
    let scene = &restored.chapters[0].scenes[0];
    assert_eq!(scene.character_ids, vec![restored.characters[0].id.clone()]);
}

#[test]
fn import_ignores_whitespace_differences() {
    let mut app = StoryCraft::load(MemoryKvStore::new());
    novel_a(&mut app);
    let pretty = app.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    let compact = serde_json::to_string(&value).unwrap();

    let mut fresh = StoryCraft::load(MemoryKvStore::new());
    fresh.import_json(&compact).unwrap();
    assert_eq!(fresh.projects(), app.projects());
}

#[test]
fn import_replaces_the_whole_collection() {
    let mut source = StoryCraft::load(MemoryKvStore::new());
    let imported_id = novel_a(&mut source);
    let json = source.export_json().unwrap();

    let mut app = StoryCraft::load(MemoryKvStore::new());
    let old_id = app.create_project("Old", "").unwrap();
    app.open_project(&old_id);

    app.import_json(&json).unwrap();
    assert_eq!(app.projects().len(), 1);
    assert!(app.project(&old_id).is_none());
    assert!(app.project(&imported_id).is_some());
    assert_eq!(app.open_project_id(), None);

    let reloaded = StoryCraft::load(app.into_storage());
    assert!(reloaded.project(&imported_id).is_some());
}

#[test]
fn rejected_imports_leave_state_unchanged() {
    let mut app = StoryCraft::load(MemoryKvStore::new());
    let project_id = novel_a(&mut app);
    app.open_project(&project_id);
    let before = app.projects().to_vec();

    let not_array = app.import_json(r#"{"id": "p1", "title": "Lone"}"#).unwrap_err();
    assert!(matches!(not_array, ImportError::NotASequence));
    assert_eq!(
        not_array.user_message(),
        "The file must contain an array of projects."
    );

    let malformed = app.import_json("[{\"id\": \"p1\",").unwrap_err();
    assert!(matches!(malformed, ImportError::Malformed(_)));

    let bad_entry = app.import_json(r#"[{"id": "p1", "title": "Ok"}, 42]"#).unwrap_err();
    assert!(matches!(bad_entry, ImportError::InvalidProject(_)));

    assert_eq!(app.projects(), before.as_slice());
    assert_eq!(app.open_project_id(), Some(project_id.as_str()));
}

#[test]
fn backup_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new(dir.path()).unwrap();

    let mut app = StoryCraft::load(MemoryKvStore::new());
    novel_a(&mut app);
    let path = app.export_backup(config.backup_dir()).unwrap();

    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("storycraft_backup_"));
    assert!(file_name.ends_with(".json"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  {\n"));

    let mut fresh = StoryCraft::load(MemoryKvStore::new());
    assert_eq!(fresh.import_file(&path).unwrap(), 1);
    assert_eq!(fresh.projects(), app.projects());

    let missing = fresh
        .import_file(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(missing, ImportError::Io(_)));
    assert_eq!(fresh.projects().len(), 1);
}

#[test]
fn sqlite_backed_app_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new(dir.path().join("data")).unwrap();

    let project_id = {
        let mut app = StoryCraft::open(&config).unwrap();
        let id = app.create_project("Novel A", "").unwrap();
        app.edit_world(&id, |notebook| notebook.add("Tides", "Twice a day."))
            .flatten()
            .unwrap();
        id
    };

    let app = StoryCraft::open(&config).unwrap();
    let project = app.project(&project_id).unwrap();
    assert_eq!(project.world_blocks[0].content, "Twice a day.");
}

#[test]
fn open_reports_unusable_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = AppConfig::new(blocker.join("data")).unwrap();

    let err = StoryCraft::open(&config).err().unwrap();
    assert!(matches!(err, StorageError::DataDir { .. }));
    assert_eq!(err.code(), "data_dir_failed");
}

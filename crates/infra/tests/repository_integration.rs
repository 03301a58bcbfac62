//! Profile storage end to end over a real SQLite file.

mod support;

use std::sync::Arc;

use profilebox_core::{ProfileSeeder, SessionService};
use profilebox_domain::{PhotoSource, ProfileBoxError, ProfileFields};
use profilebox_infra::FsPhotoStore;
use support::TestDatabase;

#[tokio::test(flavor = "multi_thread")]
async fn seeding_is_idempotent_and_keeps_edits() {
    let db = TestDatabase::migrated();
    let seeder = db.seeder();
    let service = db.service();

    let first = seeder.seed_user("alice").await.unwrap();
    assert_eq!(first.profiles_inserted, 4);
    assert_eq!(first.sections_inserted, 16);

    let second = seeder.seed_user("alice").await.unwrap();
    assert!(second.is_noop());
    assert_eq!(db.count("SELECT COUNT(*) FROM Profiles WHERE Username = 'alice'"), 4);
    assert_eq!(db.count("SELECT COUNT(*) FROM Sections WHERE Username = 'alice'"), 16);

    service.save_section("alice", "Box2", "Hobbies", Some("climbing")).await.unwrap();
    seeder.seed_user("alice").await.unwrap();
    assert_eq!(service.get_section("alice", "Box2", "Hobbies").await.unwrap(), "climbing");

    let boxes = service.list_boxes("alice").await.unwrap();
    let names: Vec<_> = boxes.iter().map(|(_, p)| p.display_name.as_str()).collect();
    assert_eq!(names, ["Lance R.", "Anna C.", "Marc D.", "Kyla P."]);
}

#[tokio::test(flavor = "multi_thread")]
async fn absent_rows_read_as_empty_strings() {
    let db = TestDatabase::migrated();
    let service = db.service();

    let profile = service.get_profile("nobody", "Box9").await.unwrap();
    assert_eq!(
        (profile.display_name.as_str(), profile.brief.as_str(), profile.photo_path.as_str()),
        ("", "", "")
    );
    assert_eq!(service.get_section("nobody", "Box9", "Education").await.unwrap(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_profile_overwrites_all_fields() {
    let db = TestDatabase::migrated();
    let service = db.service();

    let fields = |name: &str, brief: &str, path: &str| ProfileFields {
        display_name: Some(name.into()),
        brief: Some(brief.into()),
        photo_path: Some(path.into()),
    };

    service.save_profile("alice", "Box1", fields("Name", "Bio", "path")).await.unwrap();
    let profile = service.get_profile("alice", "Box1").await.unwrap();
    assert_eq!(
        (profile.display_name.as_str(), profile.brief.as_str(), profile.photo_path.as_str()),
        ("Name", "Bio", "path")
    );

    service.save_profile("alice", "Box1", fields("N2", "B2", "p2")).await.unwrap();
    let profile = service.get_profile("alice", "Box1").await.unwrap();
    assert_eq!(profile.display_name, "N2");
    assert_eq!(profile.brief, "B2");
    assert_eq!(profile.photo_path, "p2");

    service.save_profile("alice", "Box1", ProfileFields::default()).await.unwrap();
    assert!(service.get_profile("alice", "Box1").await.unwrap().is_empty());
    assert_eq!(db.count("SELECT COUNT(*) FROM Profiles WHERE DisplayName IS NULL"), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn section_saves_refresh_timestamp_and_accept_any_name() {
    let db = TestDatabase::migrated();
    let service = db.service();

    let first = service.save_section("alice", "Box1", "Message", Some("a")).await.unwrap();
    let second = service.save_section("alice", "Box1", "Message", Some("a")).await.unwrap();
    assert!(second > first);

    service.save_section("alice", "Box1", "Projects", None).await.unwrap();
    assert_eq!(service.get_section("alice", "Box1", "Projects").await.unwrap(), "");
    assert_eq!(db.count("SELECT COUNT(*) FROM Sections WHERE Section = 'Projects'"), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn boxes_and_users_are_isolated() {
    let db = TestDatabase::migrated();
    let service = db.service();

    service.save_section("alice", "Box1", "Skills", Some("Rust")).await.unwrap();
    service.save_section("alice", "Box2", "Skills", Some("Go")).await.unwrap();
    service.save_section("bob", "Box1", "Skills", Some("C#")).await.unwrap();

    assert_eq!(service.get_section("alice", "Box1", "Skills").await.unwrap(), "Rust");
    assert_eq!(service.get_section("alice", "Box2", "Skills").await.unwrap(), "Go");
    assert_eq!(service.get_section("bob", "Box1", "Skills").await.unwrap(), "C#");
    assert_eq!(service.get_section("bob", "Box2", "Skills").await.unwrap(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn sections_without_profile_row_are_allowed() {
    let db = TestDatabase::migrated();
    let service = db.service();

    service.save_section("ghost", "Box4", "Hobbies", Some("haunting")).await.unwrap();
    assert_eq!(db.count("SELECT COUNT(*) FROM Profiles WHERE Username = 'ghost'"), 0);

    let page = service.load_page("ghost", "Box4").await.unwrap();
    assert_eq!(page.sections[1].body, "haunting");
    assert_eq!(page.photo, PhotoSource::Placeholder { initials: "??".into() });
}

#[tokio::test(flavor = "multi_thread")]
async fn login_seeds_and_photo_import_updates_profile() {
    let db = TestDatabase::migrated();
    let repo = db.repository();
    let sessions = SessionService::new(ProfileSeeder::new(repo.clone(), repo.clone()));

    let session = sessions.login("  dana ", "pw").await.unwrap();
    assert_eq!(session.username, "dana");
    assert_eq!(session.seeded.profiles_inserted, 4);

    let blank = sessions.login("   ", "pw").await.unwrap_err();
    assert!(matches!(blank, ProfileBoxError::InvalidInput(_)));

    let photos = Arc::new(FsPhotoStore::new(db.temp_dir.path().join("ProfileImages")));
    let service = db.service().with_photo_store(photos);
    let source = db.temp_dir.create_file("me.png", b"\x89PNG").unwrap();

    let profile = service.import_photo("dana", "Box2", &source).await.unwrap();
    assert!(profile.photo_path.ends_with("dana_Box2.png"));
    assert_eq!(profile.display_name, "Anna C.");

    let page = service.load_page("dana", "Box2").await.unwrap();
    assert!(matches!(page.photo, PhotoSource::File { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_saves_to_one_section_stay_ordered() {
    let db = TestDatabase::migrated();
    let service = db.service();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service.save_section("alice", "Box1", "Message", Some(&format!("v{i}"))).await
            })
        })
        .collect();

    let mut stamps = Vec::new();
    for handle in handles {
        stamps.push(handle.await.unwrap().unwrap());
    }
    stamps.sort();
    stamps.dedup();
    assert_eq!(stamps.len(), 8, "every save gets its own timestamp");
    assert_eq!(db.count("SELECT COUNT(*) FROM Sections"), 1);
}

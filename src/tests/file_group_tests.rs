use super::*;

#[test]
fn resolves_between_binary_and_json() {
    let binary = FileGroup::new("configs/foo.kfg");
    assert_eq!(
        binary.filename_for(Encoding::Json),
        PathBuf::from("configs/foo.json")
    );

    let json = FileGroup::new("configs/foo.json");
    assert_eq!(
        json.filename_for(Encoding::Binary),
        PathBuf::from("configs/foo.kfg")
    );
}

#[test]
fn replaces_foreign_extension_and_appends_when_missing() {
    let txt = FileGroup::new("foo.txt");
    assert_eq!(txt.filename_for(Encoding::Binary), PathBuf::from("foo.kfg"));

    let bare = FileGroup::new("foo");
    assert_eq!(bare.extension(), None);
    assert_eq!(bare.filename_for(Encoding::Json), PathBuf::from("foo.json"));
}

#[test]
fn only_the_last_extension_is_replaced() {
    let group = FileGroup::new("profile.v2.kfg");
    assert_eq!(
        group.filename_for(Encoding::Json),
        PathBuf::from("profile.v2.json")
    );
}

#[test]
fn accepts_extension_with_or_without_dot() {
    let group = FileGroup::new("foo.kfg");
    assert_eq!(
        group.filename_with_extension(".json"),
        group.filename_with_extension("json")
    );
}

#[test]
fn extension_can_be_updated() {
    let mut group = FileGroup::new("foo.kfg");
    assert_eq!(group.encoding(), Some(Encoding::Binary));
    group.set_extension(".json");
    assert_eq!(group.extension(), Some("json"));
    assert_eq!(group.encoding(), Some(Encoding::Json));
    assert_eq!(group.file_name(), Path::new("foo.kfg"));
}

#[test]
fn encoding_detection_ignores_case() {
    assert_eq!(
        Encoding::from_path(Path::new("FOO.KFG")),
        Some(Encoding::Binary)
    );
    assert_eq!(
        Encoding::from_path(Path::new("foo.Json")),
        Some(Encoding::Json)
    );
    assert_eq!(Encoding::from_path(Path::new("foo.cfg")), None);
    assert_eq!(Encoding::from_path(Path::new("foo")), None);
}

#[test]
fn file_filter_lists_both_encodings() {
    assert_eq!(
        FileGroup::file_filter("KeyCap"),
        "KeyCap Json files (*.json)|*.json|KeyCap Config files (*.kfg)|*.kfg|All files (*.*)|*.*"
    );
}

#[test]
fn bare_dot_name_is_all_extension() {
    let group = FileGroup::new("configs/.json");
    assert_eq!(group.extension(), Some("json"));
    assert_eq!(group.encoding(), Some(Encoding::Json));
    assert_eq!(
        group.filename_for(Encoding::Binary),
        PathBuf::from("configs/.kfg")
    );
    assert_eq!(Encoding::from_path(Path::new(".kfg")), Some(Encoding::Binary));

    let hidden = FileGroup::new(".layout.json");
    assert_eq!(
        hidden.filename_for(Encoding::Binary),
        PathBuf::from(".layout.kfg")
    );
}

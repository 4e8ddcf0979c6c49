// tests/listing_source.rs

use std::fs;
use std::path::{Path, PathBuf};

use batchconv::fs::mock::MockFileSystem;
use batchconv::fs::RealFileSystem;
use batchconv::profile::AudioProfile;
use batchconv::source::{items_from_listing, parse_listing};
use batchconv_test_utils::capture_logs;
use tracing::Level;

const DEMO_LISTING: &str = "Demo\nArtist\n01 First Song\n02 Second Song\n";

#[test]
fn test_only_tracks_with_wav_files_become_items() {
    let fs = MockFileSystem::new();
    fs.add_file("rip/titels", DEMO_LISTING);
    fs.add_file("rip/track01.cdda.wav", b"RIFF");

    let items = items_from_listing(&fs, Path::new("rip/titels"), &AudioProfile::default());

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, "01");
    assert_eq!(item.title, "First Song");
    assert_eq!(item.input, PathBuf::from("rip/track01.cdda.wav"));
    assert_eq!(item.output, PathBuf::from("rip/track01.mp3"));
    assert_eq!(
        item.args,
        vec!["--tt", "First Song", "--ta", "Artist", "--tl", "Demo", "--tn", "01"]
    );
}

#[test]
fn test_listing_in_current_directory() {
    let fs = MockFileSystem::new();
    fs.add_file("titels", DEMO_LISTING);
    fs.add_file("track01.cdda.wav", b"RIFF");
    fs.add_file("track02.cdda.wav", b"RIFF");

    let items = items_from_listing(&fs, Path::new("titels"), &AudioProfile::default());

    let outputs: Vec<_> = items.iter().map(|i| i.output_name()).collect();
    assert_eq!(outputs, vec!["track01.mp3", "track02.mp3"]);
}

#[test]
fn test_absent_listing_yields_no_items() {
    let fs = MockFileSystem::new();
    fs.add_file("track01.cdda.wav", b"RIFF");

    let items = items_from_listing(&fs, Path::new("titels"), &AudioProfile::default());
    assert!(items.is_empty());
}

#[test]
fn test_listing_without_artist_line_yields_no_items() {
    let fs = MockFileSystem::new();
    fs.add_file("titels", "Only an album line\n");
    fs.add_file("track01.cdda.wav", b"RIFF");

    let items = items_from_listing(&fs, Path::new("titels"), &AudioProfile::default());
    assert!(items.is_empty());
}

#[test]
fn test_building_items_twice_gives_the_same_list() {
    let fs = MockFileSystem::new();
    fs.add_file("titels", DEMO_LISTING);
    fs.add_file("track01.cdda.wav", b"RIFF");
    fs.add_file("track02.cdda.wav", b"RIFF");

    let profile = AudioProfile::default();
    let first = items_from_listing(&fs, Path::new("titels"), &profile);
    let second = items_from_listing(&fs, Path::new("titels"), &profile);
    assert_eq!(first, second);
}

#[test]
fn test_removed_wav_drops_the_track() {
    let fs = MockFileSystem::new();
    fs.add_file("titels", DEMO_LISTING);
    fs.add_file("track01.cdda.wav", b"RIFF");
    fs.add_file("track02.cdda.wav", b"RIFF");
    fs.remove_file("track01.cdda.wav");

    let items = items_from_listing(&fs, Path::new("titels"), &AudioProfile::default());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "02");
}

#[test]
fn test_parse_listing_skips_blank_and_unnumbered_lines() {
    let text = "Album\nSomeone\n\n01 Intro\nliner notes\n   \n3 Three  Spaces\n";
    let listing = parse_listing(text).expect("album and artist present");

    assert_eq!(listing.album, "Album");
    assert_eq!(listing.artist, "Someone");
    assert_eq!(listing.tracks.len(), 2);

    assert_eq!(listing.tracks[0].number, 1);
    assert_eq!(listing.tracks[0].title, "Intro");

    // Runs of whitespace inside a title collapse to single spaces.
    assert_eq!(listing.tracks[1].number, 3);
    assert_eq!(listing.tracks[1].title, "Three Spaces");
    assert_eq!(listing.tracks[1].input_name(), "track03.cdda.wav");
    assert_eq!(listing.tracks[1].output_name(), "track03.mp3");
}

#[test]
fn test_parse_listing_needs_two_header_lines() {
    assert!(parse_listing("").is_none());
    assert!(parse_listing("Album only").is_none());

    let listing = parse_listing("Album\nArtist").unwrap();
    assert!(listing.tracks.is_empty());
}

#[test]
fn test_track_numbers_above_99_are_not_truncated() {
    let listing = parse_listing("A\nB\n100 Bonus\n").unwrap();
    assert_eq!(listing.tracks[0].padded_number(), "100");
    assert_eq!(listing.tracks[0].input_name(), "track100.cdda.wav");
}

#[test]
fn test_real_filesystem_listing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("titels"), DEMO_LISTING).unwrap();
    fs::write(dir.path().join("track02.cdda.wav"), b"RIFF").unwrap();

    let items = items_from_listing(
        &RealFileSystem,
        &dir.path().join("titels"),
        &AudioProfile::default(),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "02");
    assert_eq!(items[0].title, "Second Song");
    assert_eq!(items[0].output, dir.path().join("track02.mp3"));
}

#[test]
fn test_directory_named_like_a_wav_is_not_an_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("titels"), DEMO_LISTING).unwrap();
    fs::create_dir(dir.path().join("track01.cdda.wav")).unwrap();

    let items = items_from_listing(
        &RealFileSystem,
        &dir.path().join("titels"),
        &AudioProfile::default(),
    );
    assert!(items.is_empty());
}

#[test]
fn test_undecodable_listing_is_a_warning() {
    let fs = MockFileSystem::new();
    // Latin-1 album title.
    fs.add_file("titels", b"Caf\xe9 Songs\nArtist\n01 One\n".to_vec());
    fs.add_file("track01.cdda.wav", b"RIFF");

    let (items, logs) = capture_logs(Level::WARN, || {
        items_from_listing(&fs, Path::new("titels"), &AudioProfile::default())
    });

    assert!(items.is_empty());
    assert!(logs.contains("WARN"), "logs: {logs:?}");
    assert!(logs.contains("could not be read"), "logs: {logs:?}");
}

#[test]
fn test_absent_listing_stays_below_warn_level() {
    let fs = MockFileSystem::new();

    let (items, logs) = capture_logs(Level::WARN, || {
        items_from_listing(&fs, Path::new("titels"), &AudioProfile::default())
    });

    assert!(items.is_empty());
    assert!(logs.is_empty(), "logs: {logs:?}");
}

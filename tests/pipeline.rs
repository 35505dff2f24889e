use passing_defense_dashboard::data::{DataLoader, FieldZone, LoaderError, Selection};
use passing_defense_dashboard::stats::Aggregation;
use passing_defense_dashboard::{Dashboard, DashboardConfig};
use std::fs;
use tempfile::tempdir;

const TITLE: &str = "Passing Defense Dashboard";

fn write_sources(plays: &str, defense: &str) -> (tempfile::TempDir, DashboardConfig) {
    let dir = tempdir().expect("tempdir");
    let config = DashboardConfig::with_data_dir(dir.path());
    fs::write(config.plays_path(), plays).expect("write plays");
    fs::write(config.defense_path(), defense).expect("write defense");
    (dir, config)
}

fn load_dashboard(config: &DashboardConfig) -> Dashboard {
    let loader = DataLoader::new();
    let plays = loader.load_plays(&config.plays_path()).expect("plays");
    let defense = loader.load_defense(&config.defense_path()).expect("defense");
    Dashboard::from_sources(TITLE, &plays, &defense).0
}

#[test]
fn end_to_end_example() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,offensive_formation_group,field_position,expected_points_added,quarter\n\
         1,0,Shotgun,-30,0.5,1\n\
         2,1,Shotgun,10,2.0,1\n",
        "play_id,alignment,def_target\n\
         1,Man,WR1\n\
         2,Zone,WR2\n",
    );
    let dashboard = load_dashboard(&config);

    assert_eq!(dashboard.rows().len(), 1);
    let row = &dashboard.rows()[0];
    assert_eq!(row.alignment, "Man");
    assert_eq!(row.formation, "Shotgun");
    assert_eq!(row.zone, FieldZone::BackedUp);
    assert_eq!(row.epa, 0.5);

    let midfield = dashboard.aggregate(&Selection::new(["Midfield"], Vec::<String>::new()));
    assert_eq!(midfield, Aggregation::Empty);

    let backed_up = dashboard.aggregate(&Selection::new(["Backed Up"], ["Man"]));
    let matrix = backed_up.matrix().expect("matrix");
    assert_eq!(matrix.shape(), (1, 1));
    assert_eq!(matrix.alignments, vec!["Man"]);
    assert_eq!(matrix.formations, vec!["Shotgun"]);
    assert_eq!(matrix.value("Man", "Shotgun"), Some(0.5));
}

#[test]
fn malformed_cells_become_nulls_and_are_dropped() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,offensive_formation_group,field_position,expected_points_added\n\
         1,0,Shotgun,n/a,0.5\n\
         2,0,Pistol,35,oops\n\
         3,0,Singleback,41,1.25\n\
         4,0,,12,0.75\n",
        "play_id,alignment,def_target\n\
         1,Man,WR1\n\
         2,Zone,WR1\n\
         3,Cover 1,TE\n\
         4,Man,RB\n",
    );
    let dashboard = load_dashboard(&config);

    assert_eq!(dashboard.rows().len(), 1);
    assert_eq!(dashboard.rows()[0].alignment, "Cover 1");
    assert_eq!(dashboard.rows()[0].zone, FieldZone::ScoringRange);
}

#[test]
fn boolean_penalty_flags_are_read_as_zero_or_one() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,offensive_formation_group,field_position,expected_points_added\n\
         10,False,Shotgun,-5,0.1\n\
         11,True,Shotgun,-5,9.9\n",
        "play_id,alignment,def_target\n\
         10,Zone,WR1\n\
         11,Zone,WR1\n",
    );
    let dashboard = load_dashboard(&config);

    let ids: Vec<&str> = dashboard.rows().iter().map(|r| r.play_id.as_str()).collect();
    assert_eq!(ids, vec!["10"]);
}

#[test]
fn extra_columns_are_ignored_and_duplicates_cross_join() {
    let (_dir, config) = write_sources(
        "game_id,play_id,is_no_play,offensive_formation_group,field_position,expected_points_added\n\
         100,5,0,Shotgun,20,1.0\n\
         100,5,0,Shotgun,20,3.0\n",
        "play_id,alignment,def_target,coverage_note\n\
         5,Man,WR1,press\n\
         5,Zone,WR2,off\n",
    );
    let dashboard = load_dashboard(&config);
    assert_eq!(dashboard.rows().len(), 4);

    let aggregation = dashboard.aggregate(&Selection::default());
    let matrix = aggregation.matrix().expect("matrix");
    assert_eq!(matrix.value("Man", "Shotgun"), Some(2.0));
    assert_eq!(matrix.count("Zone", "Shotgun"), Some(2));
}

#[test]
fn missing_source_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let config = DashboardConfig::with_data_dir(dir.path());
    let err = DataLoader::new()
        .load_defense(&config.defense_path())
        .unwrap_err();
    assert!(matches!(err, LoaderError::MissingFile(_)));
}

#[test]
fn missing_required_column_is_fatal() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,field_position,expected_points_added\n1,0,5,0.1\n",
        "play_id,alignment,def_target\n1,Man,WR1\n",
    );
    let err = DataLoader::new().load_plays(&config.plays_path()).unwrap_err();
    assert!(matches!(err, LoaderError::Csv { .. }));
}

#[test]
fn disjoint_ids_yield_a_steady_no_data_state() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,offensive_formation_group,field_position,expected_points_added\n1,0,Shotgun,5,0.1\n",
        "play_id,alignment,def_target\n2,Man,WR1\n",
    );
    let dashboard = load_dashboard(&config);
    assert!(dashboard.rows().is_empty());
    for _ in 0..2 {
        let view = dashboard.render(&dashboard.default_selection()).expect("view");
        assert!(view.chart.is_no_data());
    }
}

#[test]
fn na_markers_drop_rows_and_padded_labels_stay_distinct() {
    let (_dir, config) = write_sources(
        "play_id,is_no_play,offensive_formation_group,field_position,expected_points_added\n\
         1,0,Shotgun,5,1.0\n\
         2,0,Shotgun,5,3.0\n\
         3,0,NA,5,9.0\n\
         4,0,Pistol,NULL,2.0\n",
        "play_id,alignment,def_target\n\
         1,Man,WR1\n\
         2, Man,WR1\n\
         3,Zone,N/A\n\
         4,Zone,TE\n",
    );
    let dashboard = load_dashboard(&config);

    let labels: Vec<&str> = dashboard.rows().iter().map(|r| r.alignment.as_str()).collect();
    assert_eq!(labels, vec!["Man", " Man"]);
    assert!(dashboard
        .rows()
        .iter()
        .all(|r| r.formation != "NA" && r.def_target != "N/A"));

    let all = dashboard.aggregate(&dashboard.default_selection());
    let matrix = all.matrix().expect("matrix");
    assert_eq!(matrix.alignments, vec![" Man", "Man"]);
    assert_eq!(matrix.value("Man", "Shotgun"), Some(1.0));
    assert_eq!(matrix.value(" Man", "Shotgun"), Some(3.0));
}

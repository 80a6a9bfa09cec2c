mod common;

use rpmlens_core::options::ModuleStreamFilters;

use common::*;

#[test]
fn test_modules_single_version() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let streams = zoo
            .index()
            .module_stream_list(&[&zoo.v1], &ModuleStreamFilters::default(), "")
            .unwrap();

        let keys: Vec<_> = streams
            .iter()
            .map(|m| (m.name.as_str(), m.stream.as_str()))
            .collect();
        assert_eq!(keys, [("kangaroo", "0"), ("walrus", "0.71")], "{representation:?}");
        assert_eq!(streams[0].packages, ["kangaroo"]);
    }
}

#[test]
fn test_modules_keep_newest_build_per_stream() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let streams = zoo
            .index()
            .module_stream_list(&[&zoo.v1, &zoo.v2], &ModuleStreamFilters::default(), "")
            .unwrap();

        let ids: Vec<_> = streams.iter().map(|m| m.content_id.as_str()).collect();
        assert_eq!(
            ids,
            ["mod-kangaroo-0-2", "mod-walrus-0.71", "mod-walrus-5.21"],
            "{representation:?}"
        );
        assert_eq!(streams[0].version, "20180730223407");
        assert_eq!(streams[0].packages, ["kangaroo"]);
    }
}

#[test]
fn test_modules_sort_desc() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let streams = zoo
            .index()
            .module_stream_list(
                &[&zoo.v1, &zoo.v2],
                &ModuleStreamFilters::default(),
                "name:desc",
            )
            .unwrap();

        let names: Vec<_> = streams.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["walrus", "walrus", "kangaroo"], "{representation:?}");
        assert_eq!(streams[0].stream, "0.71");
    }
}

#[test]
fn test_modules_filters() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let index = zoo.index();

        let by_rpm = ModuleStreamFilters {
            rpm_names: vec!["walrus".into()],
            ..Default::default()
        };
        let streams = index.module_stream_list(&[&zoo.v2], &by_rpm, "").unwrap();
        assert_eq!(streams.len(), 2, "{representation:?}");
        assert!(streams.iter().all(|m| m.name == "walrus"));

        let by_name = ModuleStreamFilters {
            search: "KANG".into(),
            ..Default::default()
        };
        let streams = index.module_stream_list(&[&zoo.v2], &by_name, "").unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].content_id, "mod-kangaroo-0-2");
    }
}

mod common;

use common::*;

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[test]
fn test_group_search_single_version() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let groups = zoo.index().package_group_search(&[&zoo.v1], "bir", 0).unwrap();

        assert_eq!(groups.len(), 1, "{representation:?}");
        assert_eq!(groups[0].name, "birds");
        assert_eq!(
            sorted(groups[0].packages.clone()),
            ["cockateel", "penguin", "stork"]
        );
    }
}

#[test]
fn test_group_members_are_merged_across_versions() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let groups = zoo
            .index()
            .package_group_search(&[&zoo.v1, &zoo.v2], "birds", 0)
            .unwrap();

        assert_eq!(groups.len(), 1, "{representation:?}");
        assert_eq!(
            sorted(groups[0].packages.clone()),
            ["cockateel", "duck", "penguin", "stork"]
        );
    }
}

#[test]
fn test_group_search_lists_every_group() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let groups = zoo
            .index()
            .package_group_search(&[&zoo.v1, &zoo.v2], "", 0)
            .unwrap();

        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["birds", "mammals"], "{representation:?}");
        assert_eq!(sorted(groups[1].packages.clone()), ["bear", "cat"]);
    }
}

#[test]
fn test_group_limit_applies_after_merge() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let groups = zoo
            .index()
            .package_group_search(&[&zoo.v1, &zoo.v2], "", 1)
            .unwrap();

        assert_eq!(groups.len(), 1, "{representation:?}");
        assert_eq!(groups[0].name, "birds");
        assert_eq!(groups[0].packages.len(), 4);
    }
}

#[test]
fn test_environment_search() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let index = zoo.index();

        let found = index.environment_search(&[&zoo.v1], "avi", 0).unwrap();
        assert_eq!(found.len(), 1, "{representation:?}");
        assert_eq!(found[0].groups, ["birds"]);

        assert!(index.environment_search(&[&zoo.v1], "ani", 0).unwrap().is_empty());

        let found = index.environment_search(&[&zoo.v2], "ani", 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(sorted(found[0].groups.clone()), ["birds", "mammals"]);
    }
}

#[test]
fn test_environment_groups_are_merged() {
    for representation in REPRESENTATIONS {
        let zoo = zoo_repository(representation);
        let found = zoo
            .index()
            .environment_search(&[&zoo.v1, &zoo.v2], "", 0)
            .unwrap();

        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["animals", "avians"], "{representation:?}");
        assert_eq!(sorted(found[1].groups.clone()), ["birds", "seabirds"]);
    }
}

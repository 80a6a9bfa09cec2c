//! A content management service stand-in that publishes fixture datasets as
//! repository versions in a temporary store.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap},
};

use diesel::prelude::*;
use rpmlens_core::{
    reference::{parse_reference, version_href},
    sync::{ContentSync, TaskState},
    ContentIndex, CoreError, CoreResult,
};
use rpmlens_db::{
    models::{
        NewEnvironment, NewModulemd, NewModulemdPackage, NewPackage, NewPackageGroup,
        NewRepositoryContent, NewRepositoryVersion, NewUpdateRecord, NewUpdateReference,
    },
    repository::VersionRepository,
    schema::{
        core_repositorycontent, core_repositoryversion, rpm_modulemd, rpm_modulemd_packages,
        rpm_package, rpm_packageenvironment, rpm_packagegroup, rpm_updaterecord,
        rpm_updatereference,
    },
    DbPool, PoolOptions,
};
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

pub const DOMAIN: &str = "fixtures";
pub const ZOO_URL: &str = "fixture://zoo/";
pub const ZOO_TWO_URL: &str = "fixture://zoo-two/";
pub const ERRATA_URL: &str = "fixture://errata/";

/// How published versions record their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Versions carry a `content_ids` snapshot as well as add/remove events.
    Snapshot,
    /// Versions only have add/remove events.
    EventSourced,
}

pub const REPRESENTATIONS: [Representation; 2] =
    [Representation::Snapshot, Representation::EventSourced];

/// A package group or environment and its members.
pub struct Collection {
    pub content_id: &'static str,
    pub name: &'static str,
    pub members: &'static [&'static str],
}

#[derive(Default)]
pub struct Dataset {
    pub packages: Vec<NewPackage<'static>>,
    pub groups: Vec<Collection>,
    pub environments: Vec<Collection>,
    /// Module streams with the content ids of their packages.
    pub modules: Vec<(NewModulemd<'static>, &'static [&'static str])>,
    /// Advisories with their CVE ids.
    pub errata: Vec<(NewUpdateRecord<'static>, &'static [&'static str])>,
}

impl Dataset {
    fn content_ids(&self) -> BTreeSet<String> {
        let packages = self.packages.iter().map(|p| p.content_ptr_id);
        let groups = self.groups.iter().map(|g| g.content_id);
        let environments = self.environments.iter().map(|e| e.content_id);
        let modules = self.modules.iter().map(|(m, _)| m.content_ptr_id);
        let errata = self.errata.iter().map(|(e, _)| e.content_ptr_id);

        packages
            .chain(groups)
            .chain(environments)
            .chain(modules)
            .chain(errata)
            .map(String::from)
            .collect()
    }

    fn insert_units(&self, conn: &mut SqliteConnection) -> QueryResult<()> {
        for package in &self.packages {
            diesel::insert_or_ignore_into(rpm_package::table)
                .values(package)
                .execute(conn)?;
        }

        for group in &self.groups {
            let packages = group
                .members
                .iter()
                .map(|m| json!({ "name": m, "type": 0, "requires": null }))
                .collect::<Vec<_>>();
            diesel::insert_or_ignore_into(rpm_packagegroup::table)
                .values(NewPackageGroup {
                    content_ptr_id: group.content_id,
                    id: group.name,
                    name: group.name,
                    description: group.name,
                    packages: json!(packages),
                })
                .execute(conn)?;
        }

        for environment in &self.environments {
            diesel::insert_or_ignore_into(rpm_packageenvironment::table)
                .values(NewEnvironment {
                    content_ptr_id: environment.content_id,
                    id: environment.name,
                    name: environment.name,
                    description: environment.name,
                    group_ids: json!(environment.members),
                })
                .execute(conn)?;
        }

        for (module, package_ids) in &self.modules {
            diesel::insert_or_ignore_into(rpm_modulemd::table)
                .values(module)
                .execute(conn)?;
            for package_id in package_ids.iter().copied() {
                diesel::insert_or_ignore_into(rpm_modulemd_packages::table)
                    .values(NewModulemdPackage {
                        modulemd_id: module.content_ptr_id,
                        package_id,
                    })
                    .execute(conn)?;
            }
        }

        for (record, cves) in &self.errata {
            diesel::insert_or_ignore_into(rpm_updaterecord::table)
                .values(record)
                .execute(conn)?;
            for cve in cves.iter().copied() {
                let pulp_id = format!("{}-{cve}", record.content_ptr_id);
                diesel::insert_or_ignore_into(rpm_updatereference::table)
                    .values(NewUpdateReference {
                        pulp_id: &pulp_id,
                        update_record_id: record.content_ptr_id,
                        ref_id: cve,
                        ref_type: "cve",
                        title: None,
                    })
                    .execute(conn)?;
            }
            let bugzilla = format!("{}-bz", record.content_ptr_id);
            diesel::insert_or_ignore_into(rpm_updatereference::table)
                .values(NewUpdateReference {
                    pulp_id: &bugzilla,
                    update_record_id: record.content_ptr_id,
                    ref_id: "123456",
                    ref_type: "bugzilla",
                    title: Some("tracker"),
                })
                .execute(conn)?;
        }

        Ok(())
    }
}

fn package(
    content_ptr_id: &'static str,
    name: &'static str,
    version: &'static str,
    summary: &'static str,
) -> NewPackage<'static> {
    NewPackage {
        content_ptr_id,
        name,
        epoch: "0",
        version,
        release: "1",
        arch: "noarch",
        summary,
    }
}

fn collection(
    content_id: &'static str,
    name: &'static str,
    members: &'static [&'static str],
) -> Collection {
    Collection {
        content_id,
        name,
        members,
    }
}

fn module(
    content_ptr_id: &'static str,
    name: &'static str,
    stream: &'static str,
    version: &'static str,
    packages: &'static [&'static str],
) -> (NewModulemd<'static>, &'static [&'static str]) {
    let module = NewModulemd {
        content_ptr_id,
        name,
        stream,
        version,
        context: "deadbeef",
        arch: "noarch",
        description: "A module for tests",
    };
    (module, packages)
}

fn advisory(
    content_ptr_id: &'static str,
    id: &'static str,
    summary: &'static str,
    issued_date: &'static str,
    type_: Option<&'static str>,
    severity: Option<&'static str>,
    cves: &'static [&'static str],
) -> (NewUpdateRecord<'static>, &'static [&'static str]) {
    let record = NewUpdateRecord {
        content_ptr_id,
        id,
        title: id,
        summary,
        description: summary,
        issued_date,
        updated_date: issued_date,
        type_,
        severity,
        reboot_suggested: type_ == Some("security"),
    };
    (record, cves)
}

/// First version of the zoo: six packages, the `birds` group and the
/// `avians` environment.
pub fn zoo() -> Dataset {
    Dataset {
        packages: vec![
            package("pkg-penguin-0.9.1", "penguin", "0.9.1", "A dummy package of penguin"),
            package("pkg-stork-0.12", "stork", "0.12", "A dummy package of stork"),
            package("pkg-cockateel-3.1", "cockateel", "3.1", "A dummy package of cockateel"),
            package("pkg-duck-0.6", "duck", "0.6", "A dummy package of duck"),
            package("pkg-walrus-0.71", "walrus", "0.71", "A dummy package of walrus"),
            package("pkg-kangaroo-0.2", "kangaroo", "0.2", "A dummy package of kangaroo"),
        ],
        groups: vec![collection(
            "grp-birds-1",
            "birds",
            &["cockateel", "penguin", "stork"],
        )],
        environments: vec![collection("env-avians-1", "avians", &["birds"])],
        modules: vec![
            module(
                "mod-kangaroo-0-1",
                "kangaroo",
                "0",
                "20180704111719",
                &["pkg-kangaroo-0.2"],
            ),
            module(
                "mod-walrus-0.71",
                "walrus",
                "0.71",
                "20180707144203",
                &["pkg-walrus-0.71"],
            ),
        ],
        errata: vec![],
    }
}

/// Second version of the zoo: drops stork, adds bear, cat, a newer penguin,
/// walrus and kangaroo, and the `mammals` group and `animals` environment.
pub fn zoo_two() -> Dataset {
    Dataset {
        packages: vec![
            package("pkg-penguin-0.9.1", "penguin", "0.9.1", "A dummy package of penguin"),
            package("pkg-penguin-1.0", "penguin", "1.0", "Penguin rebuilt"),
            package("pkg-cockateel-3.1", "cockateel", "3.1", "A dummy package of cockateel"),
            package("pkg-duck-0.6", "duck", "0.6", "A dummy package of duck"),
            package("pkg-bear-4.1", "bear", "4.1", "A dummy package of bear"),
            package("pkg-cat-1.0", "cat", "1.0", "A dummy package of cat"),
            package("pkg-walrus-0.71", "walrus", "0.71", "A dummy package of walrus"),
            package("pkg-walrus-5.21", "walrus", "5.21", "A dummy package of walrus"),
            package("pkg-kangaroo-0.2", "kangaroo", "0.2", "A dummy package of kangaroo"),
            package("pkg-kangaroo-0.3", "kangaroo", "0.3", "A dummy package of kangaroo"),
        ],
        groups: vec![
            collection("grp-birds-2", "birds", &["cockateel", "penguin", "duck"]),
            collection("grp-mammals-1", "mammals", &["bear", "cat"]),
        ],
        environments: vec![
            collection("env-avians-2", "avians", &["birds", "seabirds"]),
            collection("env-animals-1", "animals", &["birds", "mammals"]),
        ],
        modules: vec![
            module(
                "mod-kangaroo-0-2",
                "kangaroo",
                "0",
                "20180730223407",
                &["pkg-kangaroo-0.3"],
            ),
            module(
                "mod-walrus-0.71",
                "walrus",
                "0.71",
                "20180707144203",
                &["pkg-walrus-0.71"],
            ),
            module(
                "mod-walrus-5.21",
                "walrus",
                "5.21",
                "20180704144203",
                &["pkg-walrus-5.21"],
            ),
        ],
        errata: vec![],
    }
}

/// Six advisories covering every type and severity bucket.
pub fn errata() -> Dataset {
    Dataset {
        errata: vec![
            advisory(
                "adv-1",
                "RHSA-2013:0001",
                "penguin security update",
                "2013-01-27 16:08:09",
                Some("security"),
                Some("Critical"),
                &["CVE-2013-0001", "CVE-2013-0002"],
            ),
            advisory(
                "adv-2",
                "RHSA-2012:0002",
                "stork security update",
                "2012-06-01 00:00:00",
                Some("security"),
                Some("Important"),
                &["CVE-2012-1111"],
            ),
            advisory(
                "adv-3",
                "RHBA-2011:0003",
                "duck bug fix",
                "2011-03-03 00:00:00",
                Some("bugfix"),
                Some("Moderate"),
                &[],
            ),
            advisory(
                "adv-4",
                "RHBA-2010:0004",
                "walrus bug fix",
                "2010-10-10 00:00:00",
                Some("bugfix"),
                Some("Low"),
                &[],
            ),
            advisory(
                "adv-5",
                "RHEA-2009:0005",
                "kangaroo enhancement",
                "2009-05-20 00:00:00",
                Some("enhancement"),
                None,
                &[],
            ),
            advisory(
                "adv-6",
                "CUSTOM-2012:0006",
                "bear custom advisory",
                "2012-01-01 00:00:00",
                Some("custom-x"),
                Some("None"),
                &[],
            ),
        ],
        ..Dataset::default()
    }
}

fn dataset(url: &str) -> Option<Dataset> {
    match url {
        ZOO_URL => Some(zoo()),
        ZOO_TWO_URL => Some(zoo_two()),
        ERRATA_URL => Some(errata()),
        _ => None,
    }
}

struct Repository {
    id: String,
    domain: String,
    name: String,
}

/// [`ContentSync`] implementation that publishes a new repository version
/// from the dataset its remote points at.
pub struct FixtureSync {
    pool: DbPool,
    representation: Representation,
    repositories: RefCell<HashMap<String, Repository>>,
    remotes: RefCell<HashMap<String, String>>,
    tasks: RefCell<HashMap<String, TaskState>>,
    _dir: TempDir,
}

impl FixtureSync {
    pub fn new(representation: Representation) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let pool =
            DbPool::open_and_migrate(dir.path().join("content.db"), &PoolOptions::default())
                .unwrap();

        Self {
            pool,
            representation,
            repositories: RefCell::new(HashMap::new()),
            remotes: RefCell::new(HashMap::new()),
            tasks: RefCell::new(HashMap::new()),
            _dir: dir,
        }
    }

    pub fn index(&self) -> ContentIndex {
        ContentIndex::new(self.pool.clone())
    }

    /// Syncs and waits for the task, returning the new latest version href.
    pub fn sync_latest(&self, repo_ref: &str, remote_ref: &str) -> String {
        let task = self.sync_repository(repo_ref, remote_ref).unwrap();
        self.poll_task(&task).unwrap().into_result().unwrap();

        let repositories = self.repositories.borrow();
        let repo = &repositories[repo_ref];
        self.repository_by_name(&repo.domain, &repo.name)
            .unwrap()
            .unwrap()
    }

    /// Clears the snapshot of a version, as if it predated snapshots.
    pub fn drop_snapshot(&self, href: &str) {
        let version = parse_reference(href).unwrap();
        self.pool
            .with_conn(|conn| {
                diesel::update(core_repositoryversion::table)
                    .filter(core_repositoryversion::repository_id.eq(version.repository_id.as_str()))
                    .filter(core_repositoryversion::number.eq(version.number))
                    .set(core_repositoryversion::content_ids.eq(None::<serde_json::Value>))
                    .execute(conn)
                    .map_err(CoreError::from)
            })
            .unwrap();
    }

    fn publish(&self, repository_id: &str, dataset: &Dataset) -> CoreResult<i64> {
        let content_ids = dataset.content_ids();
        let snapshot =
            (self.representation == Representation::Snapshot).then(|| json!(content_ids));

        self.pool.with_conn(|conn| {
            let number = conn.transaction(|conn| {
                dataset.insert_units(conn)?;

                let number = VersionRepository::latest(conn, repository_id)?
                    .map_or(0, |latest| latest.number + 1);
                let version_id = Uuid::new_v4().to_string();

                diesel::insert_into(core_repositoryversion::table)
                    .values(NewRepositoryVersion {
                        pulp_id: &version_id,
                        repository_id,
                        number,
                        content_ids: snapshot,
                    })
                    .execute(conn)?;

                let present: BTreeSet<String> = core_repositorycontent::table
                    .filter(core_repositorycontent::repository_id.eq(repository_id))
                    .filter(core_repositorycontent::version_removed_id.is_null())
                    .select(core_repositorycontent::content_id)
                    .load::<String>(conn)?
                    .into_iter()
                    .collect();

                for added in content_ids.difference(&present) {
                    let pulp_id = Uuid::new_v4().to_string();
                    diesel::insert_into(core_repositorycontent::table)
                        .values(NewRepositoryContent {
                            pulp_id: &pulp_id,
                            repository_id,
                            content_id: added,
                            version_added_id: &version_id,
                            version_removed_id: None,
                        })
                        .execute(conn)?;
                }

                for removed in present.difference(&content_ids) {
                    diesel::update(core_repositorycontent::table)
                        .filter(core_repositorycontent::repository_id.eq(repository_id))
                        .filter(core_repositorycontent::content_id.eq(removed.as_str()))
                        .filter(core_repositorycontent::version_removed_id.is_null())
                        .set(core_repositorycontent::version_removed_id.eq(&version_id))
                        .execute(conn)?;
                }

                Ok::<_, diesel::result::Error>(number)
            })?;

            Ok(number)
        })
    }
}

impl ContentSync for FixtureSync {
    fn create_repository(
        &self,
        domain: &str,
        name: &str,
        url: &str,
    ) -> CoreResult<(String, String)> {
        let id = Uuid::new_v4().to_string();
        let repo_ref = format!("/api/pulp/{domain}/api/v3/repositories/rpm/rpm/{id}/");
        let remote_ref = format!(
            "/api/pulp/{domain}/api/v3/remotes/rpm/rpm/{}/",
            Uuid::new_v4()
        );

        self.publish(&id, &Dataset::default())?;

        self.repositories.borrow_mut().insert(
            repo_ref.clone(),
            Repository {
                id,
                domain: domain.to_string(),
                name: name.to_string(),
            },
        );
        self.remotes
            .borrow_mut()
            .insert(remote_ref.clone(), url.to_string());

        Ok((repo_ref, remote_ref))
    }

    fn update_remote(&self, remote_ref: &str, url: &str) -> CoreResult<()> {
        match self.remotes.borrow_mut().get_mut(remote_ref) {
            Some(current) => {
                *current = url.to_string();
                Ok(())
            }
            None => Err(CoreError::Custom(format!("unknown remote {remote_ref}"))),
        }
    }

    fn sync_repository(&self, repo_ref: &str, remote_ref: &str) -> CoreResult<String> {
        let url = self
            .remotes
            .borrow()
            .get(remote_ref)
            .cloned()
            .ok_or_else(|| CoreError::Custom(format!("unknown remote {remote_ref}")))?;
        let repository_id = self
            .repositories
            .borrow()
            .get(repo_ref)
            .map(|repo| repo.id.clone())
            .ok_or_else(|| CoreError::Custom(format!("unknown repository {repo_ref}")))?;

        let state = match dataset(&url) {
            Some(dataset) => {
                self.publish(&repository_id, &dataset)?;
                TaskState::Succeeded
            }
            None => {
                TaskState::Failed(BTreeMap::from([(
                    "description".to_string(),
                    format!("404 Client Error: Not Found for url: {url}"),
                )]))
            }
        };

        let task_ref = format!("/api/pulp/{DOMAIN}/api/v3/tasks/{}/", Uuid::new_v4());
        self.tasks.borrow_mut().insert(task_ref.clone(), state);
        Ok(task_ref)
    }

    fn poll_task(&self, task_ref: &str) -> CoreResult<TaskState> {
        self.tasks
            .borrow()
            .get(task_ref)
            .cloned()
            .ok_or_else(|| CoreError::Custom(format!("unknown task {task_ref}")))
    }

    fn repository_by_name(&self, domain: &str, name: &str) -> CoreResult<Option<String>> {
        let repository_id = self
            .repositories
            .borrow()
            .values()
            .find(|repo| repo.domain == domain && repo.name == name)
            .map(|repo| repo.id.clone());

        let Some(repository_id) = repository_id else {
            return Ok(None);
        };

        let latest = self
            .pool
            .with_conn(|conn| Ok::<_, CoreError>(VersionRepository::latest(conn, &repository_id)?))?;

        Ok(latest.map(|version| version_href(domain, &repository_id, version.number)))
    }
}

/// The zoo repository synced twice: `v1` from [`zoo`], `v2` from [`zoo_two`].
pub struct Zoo {
    pub sync: FixtureSync,
    pub v1: String,
    pub v2: String,
}

impl Zoo {
    pub fn index(&self) -> ContentIndex {
        self.sync.index()
    }
}

pub fn zoo_repository(representation: Representation) -> Zoo {
    let sync = FixtureSync::new(representation);
    let (repo, remote) = sync.create_repository(DOMAIN, "zoo", ZOO_URL).unwrap();
    let v1 = sync.sync_latest(&repo, &remote);

    sync.update_remote(&remote, ZOO_TWO_URL).unwrap();
    let v2 = sync.sync_latest(&repo, &remote);

    Zoo {
        sync,
        v1,
        v2,
    }
}

/// A repository with one version holding the [`errata`] dataset.
pub fn errata_repository(representation: Representation) -> (FixtureSync, String) {
    let sync = FixtureSync::new(representation);
    let (repo, remote) = sync
        .create_repository(DOMAIN, "errata", ERRATA_URL)
        .unwrap();
    let version = sync.sync_latest(&repo, &remote);
    (sync, version)
}

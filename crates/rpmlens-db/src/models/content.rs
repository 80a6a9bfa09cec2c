use diesel::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::schema::{
    rpm_modulemd, rpm_modulemd_packages, rpm_package, rpm_packageenvironment, rpm_packagegroup,
    rpm_updaterecord, rpm_updatereference,
};

/// One distinct package name visible in the requested versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSearchItem {
    pub name: String,
    pub summary: String,
}

/// A package group with the union of its member package names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageGroupItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub packages: Vec<String>,
}

/// An environment with the union of its member group ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub groups: Vec<String>,
}

/// A single package content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageListItem {
    pub content_id: String,
    pub name: String,
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    pub summary: String,
}

/// A module stream and the names of the packages it provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStreamItem {
    pub content_id: String,
    pub name: String,
    pub stream: String,
    pub version: String,
    pub context: String,
    pub arch: String,
    pub description: String,
    pub packages: Vec<String>,
}

/// An advisory. Missing type or severity is reported as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrataItem {
    pub content_id: String,
    pub id: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub issued_date: String,
    pub updated_date: String,
    #[serde(rename = "type")]
    pub errata_type: String,
    pub severity: String,
    pub reboot_suggested: bool,
    pub cves: Vec<String>,
}

#[derive(Default, Insertable)]
#[diesel(table_name = rpm_package)]
pub struct NewPackage<'a> {
    pub content_ptr_id: &'a str,
    pub name: &'a str,
    pub epoch: &'a str,
    pub version: &'a str,
    pub release: &'a str,
    pub arch: &'a str,
    pub summary: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = rpm_packagegroup)]
pub struct NewPackageGroup<'a> {
    pub content_ptr_id: &'a str,
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub packages: Value,
}

#[derive(Insertable)]
#[diesel(table_name = rpm_packageenvironment)]
pub struct NewEnvironment<'a> {
    pub content_ptr_id: &'a str,
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub group_ids: Value,
}

#[derive(Default, Insertable)]
#[diesel(table_name = rpm_modulemd)]
pub struct NewModulemd<'a> {
    pub content_ptr_id: &'a str,
    pub name: &'a str,
    pub stream: &'a str,
    pub version: &'a str,
    pub context: &'a str,
    pub arch: &'a str,
    pub description: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = rpm_modulemd_packages)]
pub struct NewModulemdPackage<'a> {
    pub modulemd_id: &'a str,
    pub package_id: &'a str,
}

#[derive(Default, Insertable)]
#[diesel(table_name = rpm_updaterecord)]
pub struct NewUpdateRecord<'a> {
    pub content_ptr_id: &'a str,
    pub id: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
    pub issued_date: &'a str,
    pub updated_date: &'a str,
    pub type_: Option<&'a str>,
    pub severity: Option<&'a str>,
    pub reboot_suggested: bool,
}

#[derive(Insertable)]
#[diesel(table_name = rpm_updatereference)]
pub struct NewUpdateReference<'a> {
    pub pulp_id: &'a str,
    pub update_record_id: &'a str,
    pub ref_id: &'a str,
    pub ref_type: &'a str,
    pub title: Option<&'a str>,
}

//! Column constants for the content tables, each under a fixed alias.

use crate::define_entity;

define_entity!(
    packages {
        table: "rpm_package",
        alias: "rp",
        columns: {
            CONTENT_ID: String => "content_ptr_id",
            NAME: String => "name",
            EPOCH: String => "epoch",
            VERSION: String => "version",
            RELEASE: String => "release",
            ARCH: String => "arch",
            SUMMARY: String => "summary"
        }
    }
);

define_entity!(
    package_groups {
        table: "rpm_packagegroup",
        alias: "pg",
        columns: {
            CONTENT_ID: String => "content_ptr_id",
            ID: String => "id",
            NAME: String => "name",
            DESCRIPTION: String => "description",
            PACKAGES: String => "packages" [json]
        }
    }
);

define_entity!(
    environments {
        table: "rpm_packageenvironment",
        alias: "pe",
        columns: {
            CONTENT_ID: String => "content_ptr_id",
            ID: String => "id",
            NAME: String => "name",
            DESCRIPTION: String => "description",
            GROUP_IDS: String => "group_ids" [json]
        }
    }
);

define_entity!(
    modules {
        table: "rpm_modulemd",
        alias: "rm",
        columns: {
            CONTENT_ID: String => "content_ptr_id",
            NAME: String => "name",
            STREAM: String => "stream",
            VERSION: String => "version",
            CONTEXT: String => "context",
            ARCH: String => "arch",
            DESCRIPTION: String => "description"
        }
    }
);

define_entity!(
    errata {
        table: "rpm_updaterecord",
        alias: "ur",
        columns: {
            CONTENT_ID: String => "content_ptr_id",
            ID: String => "id",
            TITLE: String => "title",
            SUMMARY: String => "summary",
            DESCRIPTION: String => "description",
            ISSUED_DATE: String => "issued_date",
            UPDATED_DATE: String => "updated_date",
            TYPE: Option<String> => "type",
            SEVERITY: Option<String> => "severity",
            REBOOT_SUGGESTED: bool => "reboot_suggested"
        }
    }
);

diesel::table! {
    core_repositoryversion (pulp_id) {
        pulp_id -> Text,
        repository_id -> Text,
        number -> BigInt,
        content_ids -> Nullable<Jsonb>,
    }
}

diesel::table! {
    core_repositorycontent (pulp_id) {
        pulp_id -> Text,
        repository_id -> Text,
        content_id -> Text,
        version_added_id -> Text,
        version_removed_id -> Nullable<Text>,
    }
}

diesel::table! {
    rpm_package (content_ptr_id) {
        content_ptr_id -> Text,
        name -> Text,
        epoch -> Text,
        version -> Text,
        release -> Text,
        arch -> Text,
        summary -> Text,
    }
}

diesel::table! {
    rpm_packagegroup (content_ptr_id) {
        content_ptr_id -> Text,
        id -> Text,
        name -> Text,
        description -> Text,
        packages -> Jsonb,
    }
}

diesel::table! {
    rpm_packageenvironment (content_ptr_id) {
        content_ptr_id -> Text,
        id -> Text,
        name -> Text,
        description -> Text,
        group_ids -> Jsonb,
    }
}

diesel::table! {
    rpm_modulemd (content_ptr_id) {
        content_ptr_id -> Text,
        name -> Text,
        stream -> Text,
        version -> Text,
        context -> Text,
        arch -> Text,
        description -> Text,
    }
}

diesel::table! {
    rpm_modulemd_packages (modulemd_id, package_id) {
        modulemd_id -> Text,
        package_id -> Text,
    }
}

diesel::table! {
    rpm_updaterecord (content_ptr_id) {
        content_ptr_id -> Text,
        id -> Text,
        title -> Text,
        summary -> Text,
        description -> Text,
        issued_date -> Text,
        updated_date -> Text,
        #[sql_name = "type"]
        type_ -> Nullable<Text>,
        severity -> Nullable<Text>,
        reboot_suggested -> Bool,
    }
}

diesel::table! {
    rpm_updatereference (pulp_id) {
        pulp_id -> Text,
        update_record_id -> Text,
        ref_id -> Text,
        ref_type -> Text,
        title -> Nullable<Text>,
    }
}

diesel::joinable!(core_repositorycontent -> core_repositoryversion (version_added_id));
diesel::joinable!(rpm_modulemd_packages -> rpm_modulemd (modulemd_id));
diesel::joinable!(rpm_modulemd_packages -> rpm_package (package_id));
diesel::joinable!(rpm_updatereference -> rpm_updaterecord (update_record_id));

diesel::allow_tables_to_appear_in_same_query!(
    core_repositorycontent,
    core_repositoryversion,
    rpm_modulemd,
    rpm_modulemd_packages,
    rpm_package,
    rpm_packageenvironment,
    rpm_packagegroup,
    rpm_updaterecord,
    rpm_updatereference,
);

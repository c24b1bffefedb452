// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use bfsops_lib::{
        backend::Backend,
        config::GroupPolicy,
        console::AdminConsole,
        dialog::{ActionDialog, ActionKind, DialogState},
        error::ConsoleError,
        resource::ResourceKind,
        test_env::*,
    };

    const RACKS: &str = r#"[{"name":"rack-a","stores":[{"id":"s1","stat":"10.0.0.5:6061"}]}]"#;
    const FREE_STORES: &str = r#"[{"id":"s1"},{"id":"s2"},{"id":"s3"}]"#;
    const GROUPS: &str = r#"[{"id":1,"storeIds":["s4","s5"]}]"#;

    fn console_helper() -> AdminConsole<ScriptedBackend> {
        let backend = ScriptedBackend::new();
        backend.on_get("/rack", RACKS);
        backend.on_get("/freeStore", FREE_STORES);
        backend.on_get("/group", GROUPS);
        AdminConsole::new(backend, GroupPolicy::default())
    }

    #[test]
    fn create_group_from_selection() {
        let mut console = console_helper();
        console.backend().on_post("/group", r#"{"success":true}"#);

        console.enter(ResourceKind::FreeStore).unwrap();
        console.enter(ResourceKind::Group).unwrap();
        console.toggle_store("s1", true);
        console.toggle_store("s3", true);
        console.toggle_store("s1", false);

        console.create_group().unwrap();

        assert_eq!(
            console.backend().posts(),
            vec![(
                "/group".to_string(),
                form(&[("stores", "s3"), ("racks", "2"), ("copys", "2")])
            )]
        );
        assert!(console.selection().is_empty());
        assert!(console.needs_reload(ResourceKind::FreeStore));
        assert!(console.needs_reload(ResourceKind::Group));
    }

    #[test]
    fn create_group_with_nothing_selected_sends_nothing() {
        let mut console = console_helper();
        assert_eq!(console.create_group(), Err(ConsoleError::EmptySelection));
        assert!(console.backend().posts().is_empty());
    }

    #[test]
    fn create_group_transport_failure() {
        let mut console = console_helper();
        console.backend().fail_post("/group");
        console.toggle_store("s2", true);
        assert!(matches!(
            console.create_group(),
            Err(ConsoleError::ActionTransportError(_))
        ));
        assert_eq!(console.selection().serialize(), "s2");
    }

    #[test]
    fn init_free_volume_rejected() {
        let mut console = console_helper();
        console
            .backend()
            .on_post("/addFreeVolume", r#"{"success":false,"msg":"disk full"}"#);
        console.enter(ResourceKind::Rack).unwrap();
        console.enter(ResourceKind::FreeStore).unwrap();

        console
            .open_init_free_volume("10.0.0.5", "store-7")
            .unwrap();
        console
            .set_field(ActionKind::InitFreeVolume, "n", "2")
            .unwrap();

        assert_eq!(
            console.submit(ActionKind::InitFreeVolume),
            Err(ConsoleError::ActionRejected("disk full".to_string()))
        );

        let dialog = console.dialog(ActionKind::InitFreeVolume);
        assert_eq!(dialog.state(), DialogState::Staged);
        assert_eq!(dialog.error(), Some("disk full"));

        assert_eq!(
            console.backend().posts(),
            vec![(
                "/addFreeVolume".to_string(),
                form(&[("host", "10.0.0.5"), ("storeId", "store-7"), ("n", "2")])
            )]
        );

        // Nothing was invalidated, so no view fetches again.
        for view in [ResourceKind::Rack, ResourceKind::FreeStore] {
            assert!(!console.needs_reload(view));
            console.enter(view).unwrap();
        }
        assert_eq!(console.backend().gets("/rack"), 1);
        assert_eq!(console.backend().gets("/freeStore"), 1);
    }

    #[test]
    fn add_volume_success_reloads_groups() {
        let mut console = console_helper();
        console.backend().on_post("/addVolume", r#"{"success":true}"#);
        console.enter(ResourceKind::Group).unwrap();

        console.open_add_volume("g1").unwrap();
        console.set_field(ActionKind::AddVolume, "n", "1").unwrap();
        console.submit(ActionKind::AddVolume).unwrap();

        assert_eq!(
            console.dialog(ActionKind::AddVolume).state(),
            DialogState::Closed
        );
        assert!(console.needs_reload(ResourceKind::Group));

        console.enter(ResourceKind::Group).unwrap();
        assert_eq!(console.backend().gets("/group"), 2);
        assert!(!console.needs_reload(ResourceKind::Group));
    }

    #[test]
    fn resubmission_is_explicit() {
        let mut console = console_helper();
        console.backend().fail_post("/addVolume");

        console.open_add_volume("g1").unwrap();
        assert!(matches!(
            console.submit(ActionKind::AddVolume),
            Err(ConsoleError::ActionTransportError(_))
        ));
        assert_eq!(console.backend().posts().len(), 1);

        console.backend().on_post("/addVolume", r#"{"success":true}"#);
        console.submit(ActionKind::AddVolume).unwrap();
        assert_eq!(console.backend().posts().len(), 2);

        // Closed now, so a further submit never reaches the backend.
        assert_eq!(
            console.submit(ActionKind::AddVolume),
            Err(ConsoleError::DialogClosed)
        );
        assert_eq!(console.backend().posts().len(), 2);
    }

    #[test]
    fn in_flight_submit_sends_once() {
        let backend = ScriptedBackend::new();
        backend.on_post("/addVolume", r#"{"success":true}"#);
        let mut dialog = ActionDialog::new(ActionKind::AddVolume);
        dialog.open(&[("groupId", "g1")]).unwrap();

        let mut sent = 0;
        let first = dialog.submit();
        let second = dialog.submit();
        for submission in [first, second].into_iter().flatten() {
            let response = backend.post_form(submission.path(), &submission.form);
            sent += 1;
            dialog.complete(response).unwrap();
        }

        assert_eq!(sent, 1);
        assert_eq!(backend.posts().len(), 1);
    }

    #[test]
    fn failed_fetch_leaves_collection() {
        let mut console = console_helper();
        console.enter(ResourceKind::Rack).unwrap();
        let before = console.racks().to_vec();

        console.backend().fail_get("/rack");
        assert!(matches!(
            console.reload(ResourceKind::Rack),
            Err(ConsoleError::FetchFailed { .. })
        ));
        assert_eq!(console.racks(), &before[..]);

        console.backend().on_get("/rack", "eval('rm -rf /')");
        assert!(matches!(
            console.reload(ResourceKind::Rack),
            Err(ConsoleError::DecodeFailed(_))
        ));
        assert_eq!(console.racks(), &before[..]);
    }

    #[test]
    fn failed_first_fetch_renders_empty() {
        let mut console = console_helper();
        console.backend().fail_get("/group");
        assert!(console.enter(ResourceKind::Group).is_err());
        assert!(console.groups().is_empty());
        assert_eq!(
            bfsops_lib::render::render_view(&console, ResourceKind::Group),
            "no groups\n"
        );
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::{
    backend::Backend,
    commands::{connect, Cli, Handle, HandledResult},
    console::AdminConsole,
    dialog::{ActionKind, DialogState},
    render::{render_dialog, render_view},
    resource::ResourceKind,
};

const HELP: &str = "\
racks | free | groups      enter a view and list it
reload                     fetch the current view again
check <id>...              select free stores (free view)
uncheck <id>...            deselect free stores (free view)
create-group               group the selected free stores (free view)
info <host>                print a store's info page address
init <host> <store-id>     open the init free volume dialog
add-volume <group-id>      open the add volume dialog
set <field> <value>        fill in a field of the open dialog
show                       show the open dialog
submit                     submit the open dialog
cancel                     close the open dialog
quit
";

/// What the shell should do after a line.
#[derive(Debug, PartialEq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// An interactive session over a console: tracks the view being shown and the dialog that
/// `set`, `submit` and `cancel` apply to.
pub struct Shell<B: Backend> {
    console: AdminConsole<B>,
    view: Option<ResourceKind>,
    active: Option<ActionKind>,
}

impl<B: Backend> Shell<B> {
    pub fn new(console: AdminConsole<B>) -> Self {
        Shell {
            console,
            view: None,
            active: None,
        }
    }

    pub fn console(&self) -> &AdminConsole<B> {
        &self.console
    }

    pub fn execute(&mut self, line: &str) -> Step {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return Step::Continue(String::new());
        };
        debug!("shell command: {command} {args:?}");

        let out = match *command {
            "racks" => self.show_view(ResourceKind::Rack),
            "free" => self.show_view(ResourceKind::FreeStore),
            "groups" => self.show_view(ResourceKind::Group),
            "reload" => self.reload(),
            "check" => self.toggle(args, true),
            "uncheck" => self.toggle(args, false),
            "create-group" => self.create_group(),
            "info" => match args {
                [host] => format!("{}\n", crate::store_info_url(host)),
                _ => "usage: info <host>\n".to_string(),
            },
            "init" => match args {
                [host, store_id] => {
                    let opened = self.console.open_init_free_volume(host, store_id);
                    self.opened(ActionKind::InitFreeVolume, opened)
                }
                _ => "usage: init <host> <store-id>\n".to_string(),
            },
            "add-volume" => match args {
                [group_id] => {
                    let opened = self.console.open_add_volume(group_id);
                    self.opened(ActionKind::AddVolume, opened)
                }
                _ => "usage: add-volume <group-id>\n".to_string(),
            },
            "set" => self.set(args),
            "show" => match self.active {
                Some(kind) => render_dialog(self.console.dialog(kind)),
                None => "no dialog open\n".to_string(),
            },
            "submit" => self.submit(),
            "cancel" => self.cancel(),
            "help" => HELP.to_string(),
            "quit" | "exit" => return Step::Quit,
            other => format!("unknown command '{other}', try 'help'\n"),
        };

        Step::Continue(out)
    }

    fn show_view(&mut self, view: ResourceKind) -> String {
        if self.view == Some(ResourceKind::FreeStore) && view != ResourceKind::FreeStore {
            self.console.leave_free_stores();
        }
        self.view = Some(view);

        match self.console.enter(view) {
            Ok(()) => render_view(&self.console, view),
            Err(e) => format!("error: {e}\n{}", render_view(&self.console, view)),
        }
    }

    fn reload(&mut self) -> String {
        let Some(view) = self.view else {
            return "no view to reload\n".to_string();
        };
        match self.console.reload(view) {
            Ok(()) => render_view(&self.console, view),
            Err(e) => format!("error: {e}\n{}", render_view(&self.console, view)),
        }
    }

    fn toggle(&mut self, ids: &[&str], included: bool) -> String {
        if self.view != Some(ResourceKind::FreeStore) {
            return "stores can only be checked in the free view\n".to_string();
        }
        for id in ids {
            self.console.toggle_store(id, included);
        }
        format!("selected: {}\n", self.console.selection().serialize())
    }

    fn create_group(&mut self) -> String {
        if self.view != Some(ResourceKind::FreeStore) {
            return "groups can only be created from the free view\n".to_string();
        }
        match self.console.create_group() {
            Ok(request) => format!(
                "created group from stores {}\n{}",
                request.stores,
                self.show_view(ResourceKind::FreeStore)
            ),
            Err(e) => format!("error: {e}\n"),
        }
    }

    fn opened(&mut self, kind: ActionKind, opened: crate::error::Result<()>) -> String {
        match opened {
            Ok(()) => {
                self.active = Some(kind);
                render_dialog(self.console.dialog(kind))
            }
            Err(e) => format!("error: {e}\n"),
        }
    }

    fn set(&mut self, args: &[&str]) -> String {
        let Some(kind) = self.active else {
            return "no dialog open\n".to_string();
        };
        let [key, value @ ..] = args else {
            return "usage: set <field> <value>\n".to_string();
        };
        if value.is_empty() {
            return "usage: set <field> <value>\n".to_string();
        }
        match self.console.set_field(kind, key, &value.join(" ")) {
            Ok(()) => render_dialog(self.console.dialog(kind)),
            Err(e) => format!("error: {e}\n"),
        }
    }

    fn submit(&mut self) -> String {
        let Some(kind) = self.active else {
            return "no dialog open\n".to_string();
        };
        match self.console.submit(kind) {
            Ok(()) => {
                self.active = None;
                let mut out = format!("{kind}: done\n");
                if let Some(view) = self.view {
                    if self.console.needs_reload(view) {
                        out.push_str(&self.show_view(view));
                    }
                }
                out
            }
            Err(e) => match self.console.dialog(kind).state() {
                DialogState::Staged => render_dialog(self.console.dialog(kind)),
                _ => format!("error: {e}\n"),
            },
        }
    }

    fn cancel(&mut self) -> String {
        let Some(kind) = self.active else {
            return "no dialog open\n".to_string();
        };
        match self.console.cancel(kind) {
            Ok(()) => {
                self.active = None;
                format!("{kind}: cancelled\n")
            }
            Err(e) => format!("error: {e}\n"),
        }
    }
}

/// Read commands from `input` until it ends or the operator quits.
pub fn run<B: Backend, R: BufRead, W: Write>(
    shell: &mut Shell<B>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "bfsops> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("skipping unreadable input line: {e}");
                write!(out, "error: unreadable input line: {e}\nbfsops> ")?;
                out.flush()?;
                continue;
            }
            Err(e) => return Err(e),
        };
        match shell.execute(&line) {
            Step::Continue(text) => write!(out, "{text}")?,
            Step::Quit => return Ok(()),
        }
        write!(out, "bfsops> ")?;
        out.flush()?;
    }

    writeln!(out)
}

pub fn shell(cli: &Cli) -> HandledResult<()> {
    let mut shell = Shell::new(connect(cli)?);

    run(&mut shell, io::stdin().lock(), &mut io::stdout())
        .handle_err(|e| eprintln!("Shell I/O error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GroupPolicy, test_env::*};

    fn shell() -> Shell<ScriptedBackend> {
        let backend = ScriptedBackend::new();
        backend.on_get("/freeStore", r#"[{"id":"s1"},{"id":"s2"},{"id":"s3"}]"#);
        backend.on_get("/group", r#"[{"id":1,"storeIds":["s8","s9"]}]"#);
        Shell::new(AdminConsole::new(backend, GroupPolicy::default()))
    }

    fn output(step: Step) -> String {
        match step {
            Step::Continue(text) => text,
            Step::Quit => panic!("shell quit"),
        }
    }

    #[test]
    fn check_requires_free_view() {
        let mut shell = shell();
        assert!(output(shell.execute("check s1")).contains("free view"));
        shell.execute("free");
        assert_eq!(output(shell.execute("check s1 s3")), "selected: s1,s3\n");
    }

    #[test]
    fn leaving_free_view_drops_selection() {
        let mut shell = shell();
        shell.execute("free");
        shell.execute("check s2");
        shell.execute("groups");
        assert!(shell.console().selection().is_empty());
    }

    #[test]
    fn set_without_dialog() {
        let mut shell = shell();
        assert_eq!(output(shell.execute("set n 3")), "no dialog open\n");
    }

    #[test]
    fn rejected_submit_shows_dialog_with_error() {
        let mut shell = shell();
        shell
            .console()
            .backend()
            .on_post("/addFreeVolume", r#"{"success":false,"msg":"disk full"}"#);

        shell.execute("init 10.0.0.5:6063 store-7");
        shell.execute("set n 2");
        let out = output(shell.execute("submit"));
        assert!(out.contains("error: disk full"));
        assert!(out.contains("n = 2"));
    }

    #[test]
    fn quit() {
        assert_eq!(shell().execute("quit"), Step::Quit);
    }

    #[test]
    fn run_reads_until_quit() {
        let mut shell = shell();
        let mut out = Vec::new();
        run(&mut shell, "groups\nquit\nracks\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("group 1: stores [s8,s9]"));
        assert_eq!(shell.console().backend().gets("/rack"), 0);
    }

    #[test]
    fn run_survives_non_utf8_line() {
        let mut shell = shell();
        let mut out = Vec::new();
        run(&mut shell, &b"\xff\xfe\ngroups\nquit\n"[..], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: unreadable input line"));
        assert!(out.contains("group 1: stores [s8,s9]"));
        assert_eq!(shell.console().backend().gets("/group"), 1);
    }
}

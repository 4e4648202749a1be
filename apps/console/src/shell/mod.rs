//! Interactive shell over the employee directory.
//!
//! Runs on the current-thread runtime: one line is read, its command runs to
//! completion (including any store call), and the list is re-rendered when
//! the directory reports a change. Failed calls leave the view as it was.

mod input;

use std::io::Write;

use anyhow::Result;
use client_core::{DirectoryEvent, EmployeeDirectory, EmployeeForm, ListQuery};
use shared::{domain::EmployeeId, protocol::Route};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::TryRecvError},
};
use tracing::{info, warn};

use crate::render::{render_form, render_page};
use input::{parse_line, InputError, ShellCommand, HELP};

pub struct Shell<'a> {
    directory: &'a EmployeeDirectory,
    query: ListQuery,
    route: Route,
    events: broadcast::Receiver<DirectoryEvent>,
}

impl<'a> Shell<'a> {
    pub fn new(directory: &'a EmployeeDirectory, page_size: usize) -> Self {
        Self {
            directory,
            query: ListQuery::new(page_size),
            route: Route::List,
            events: directory.subscribe_events(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // Initial load; a failure is logged by the directory and the shell
        // starts on an empty list.
        let _ = self.directory.refresh().await;
        self.drain_changes();
        self.show_list().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("employees> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };
            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(InputError::Empty) => continue,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            if command == ShellCommand::Quit {
                break;
            }
            self.handle(command).await;

            if self.drain_changes() && self.route == Route::List {
                self.show_list().await;
            }
        }
        Ok(())
    }

    async fn handle(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Search(term) => {
                self.query.search = term;
                self.show_list().await;
            }
            ShellCommand::Sort(key) => {
                self.query.sort_by = key;
                self.show_list().await;
            }
            ShellCommand::Next => {
                let total = self.total_pages().await;
                self.query.next_page(total);
                self.show_list().await;
            }
            ShellCommand::Prev => {
                let total = self.total_pages().await;
                self.query.prev_page(total);
                self.show_list().await;
            }
            ShellCommand::Page(page) => {
                let total = self.total_pages().await;
                self.query.go_to(page, total);
                self.show_list().await;
            }
            ShellCommand::Add(fields) => {
                self.submit(Route::Create, EmployeeForm::blank(), &fields)
                    .await;
            }
            ShellCommand::Edit { id, fields } => {
                let id = match id.parse::<EmployeeId>() {
                    Ok(id) => id,
                    Err(err) => {
                        warn!("edit aborted: {err}");
                        return;
                    }
                };
                let form = self.directory.edit_form(id).await;
                self.submit(Route::Edit(id), form, &fields).await;
            }
            ShellCommand::Delete(raw_id) => match raw_id.parse::<EmployeeId>() {
                Ok(id) => {
                    let _ = self.directory.delete(id).await;
                }
                Err(err) => warn!("delete aborted: {err}"),
            },
            ShellCommand::Open(path) => self.open(&path).await,
            ShellCommand::Refresh => {
                let _ = self.directory.refresh().await;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => {}
        }
    }

    async fn submit(&mut self, route: Route, mut form: EmployeeForm, fields: &[(String, String)]) {
        for (field, value) in fields {
            if let Err(err) = form.set_field(field, value.as_str()) {
                println!("{err}");
                return;
            }
        }

        if let Ok(saved) = self.directory.submit(route, &form).await {
            info!(id = ?saved.id, "saved {}", saved.name);
            self.route = Route::List;
        }
    }

    async fn open(&mut self, path: &str) {
        let route = match path.parse::<Route>() {
            Ok(route) => route,
            Err(err) => {
                warn!("cannot open {path:?}: {err}");
                return;
            }
        };

        self.route = route;
        match route {
            Route::List => self.show_list().await,
            Route::Create => {
                print!("{}", render_form("New employee", &EmployeeForm::blank()));
                println!("submit with: add FIELD=VALUE ...");
            }
            Route::Edit(id) => {
                let form = self.directory.edit_form(id).await;
                print!("{}", render_form(&format!("Edit employee {id}"), &form));
                println!("submit with: edit {id} FIELD=VALUE ...");
            }
        }
    }

    async fn total_pages(&self) -> usize {
        self.directory.view(&self.query).await.total_pages
    }

    async fn show_list(&mut self) {
        self.route = Route::List;
        let mut page = self.directory.view(&self.query).await;
        if page.page > page.total_pages.max(1) {
            self.query.go_to(page.total_pages, page.total_pages);
            page = self.directory.view(&self.query).await;
        }
        print!("{}", render_page(&page, &self.query));
    }

    /// True when a successful mutation or reload happened since the last call.
    fn drain_changes(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(DirectoryEvent::Failed(_)) => {}
                Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }
}

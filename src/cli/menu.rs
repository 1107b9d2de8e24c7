//! Interactive numbered-choice menu.
//!
//! Menus loop until the user goes back or quits. End of input anywhere is
//! treated as Quit. Storage failures abort the session; everything else
//! (no results, cancellation, bad input, clipboard trouble) is reported and
//! the menu is shown again.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::clipboard::Clipboard;
use super::handlers::{export_document, write_export_file};
use crate::domain::{Search, SearchId, TagList};
use crate::query::{
    CANCELED, NO_RESULTS, Prompter, Query, Selection, choose, pick_tag, prompt_id, resolve,
};
use crate::store::{SearchMap, SearchRepository};

const MAIN_CHOICES: [&str; 3] = ["Searches", "Database Management", "Quit"];

const SEARCH_CHOICES: [&str; 7] = [
    "View All Searches",
    "Search by Text",
    "Search by Tag",
    "Search by ID",
    "Add Search",
    "Go Back",
    "Quit",
];

const OPTION_CHOICES: [&str; 7] = [
    "Copy",
    "Edit Tags",
    "Edit SPL",
    "Edit Notes",
    "Delete",
    "Go Back",
    "Quit",
];

const DATABASE_CHOICES: [&str; 4] = ["Export Database", "Reset Database", "Go Back", "Quit"];

const TAGS_PROMPT: &str = "Enter tags, comma separated (ENTER for none)\n--> ";

/// What a menu does after an action finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Pause, then show the current menu again.
    Stay,
    /// Leave the current menu without pausing.
    Back,
    /// End the session.
    Quit,
}

/// The interactive session.
pub struct Menu<'a, R, P, C> {
    store: &'a mut R,
    prompter: &'a mut P,
    clipboard: &'a mut C,
}

impl<'a, R, P, C> Menu<'a, R, P, C>
where
    R: SearchRepository,
    P: Prompter,
    C: Clipboard,
{
    pub fn new(store: &'a mut R, prompter: &'a mut P, clipboard: &'a mut C) -> Self {
        Self {
            store,
            prompter,
            clipboard,
        }
    }

    /// Runs the main menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.pick("Main Menu", &MAIN_CHOICES)? else {
                break;
            };
            let flow = match MAIN_CHOICES[choice] {
                "Searches" => self.searches_menu()?,
                "Database Management" => self.database_menu()?,
                _ => Flow::Quit,
            };
            if flow == Flow::Quit {
                break;
            }
        }
        tracing::debug!("menu session ended");
        Ok(())
    }

    // ===========================================
    // Searches
    // ===========================================

    fn searches_menu(&mut self) -> Result<Flow> {
        loop {
            let Some(choice) = self.pick("Searches", &SEARCH_CHOICES)? else {
                return Ok(Flow::Quit);
            };
            let flow = match SEARCH_CHOICES[choice] {
                "View All Searches" => self.open(&Query::All)?,
                "Search by Text" => self.search_by_text()?,
                "Search by Tag" => self.search_by_tag()?,
                "Search by ID" => match prompt_id(&mut *self.prompter)? {
                    Some(id) => self.open(&Query::Id(id))?,
                    None => Flow::Quit,
                },
                "Add Search" => self.add_search()?,
                "Go Back" => return Ok(Flow::Back),
                _ => return Ok(Flow::Quit),
            };
            if self.settle(flow)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn search_by_text(&mut self) -> Result<Flow> {
        let Some(term) = self.prompter.read_line("Enter the text to search for: ")? else {
            return Ok(Flow::Quit);
        };
        self.open(&Query::Text(term))
    }

    fn search_by_tag(&mut self) -> Result<Flow> {
        match pick_tag(&*self.store, &mut *self.prompter)? {
            Some(tag) => self.open(&Query::Tag(tag)),
            None => {
                self.prompter.message(NO_RESULTS)?;
                Ok(Flow::Stay)
            }
        }
    }

    /// Runs a query, narrows it to one search and offers the search options.
    fn open(&mut self, query: &Query) -> Result<Flow> {
        match resolve(&*self.store, query, &mut *self.prompter)? {
            Selection::Selected(search) => self.search_options(search),
            Selection::NoResults => {
                self.prompter.message(NO_RESULTS)?;
                Ok(Flow::Stay)
            }
            Selection::Canceled => {
                self.prompter.message(CANCELED)?;
                Ok(Flow::Stay)
            }
        }
    }

    fn add_search(&mut self) -> Result<Flow> {
        self.prompter.message("Enter SPL Below (ENTER to Cancel)")?;
        let Some(spl) = self.read_block()? else {
            return Ok(Flow::Quit);
        };
        if spl.trim().is_empty() {
            self.prompter.message(CANCELED)?;
            return Ok(Flow::Stay);
        }

        self.prompter.message("Enter Notes Below (ENTER for None)")?;
        let Some(notes) = self.read_block()? else {
            return Ok(Flow::Quit);
        };

        let Some(tags) = self.prompter.read_line(TAGS_PROMPT)? else {
            return Ok(Flow::Quit);
        };

        let id = self.store.add(&TagList::parse_input(&tags), &spl, &notes)?;
        self.prompter.message(&format!("Search {id} Added."))?;
        Ok(Flow::Stay)
    }

    // ===========================================
    // Search Options
    // ===========================================

    fn search_options(&mut self, search: Search) -> Result<Flow> {
        let id = search.id;
        self.prompter.message("")?;
        self.prompter.message("Search Options")?;
        self.prompter
            .show_results(&SearchMap::from([(id, search.clone())]))?;

        let Some(choice) = choose(&mut *self.prompter, &OPTION_CHOICES)? else {
            return Ok(Flow::Quit);
        };
        match OPTION_CHOICES[choice] {
            "Copy" => {
                match self.clipboard.copy(&search.spl) {
                    Ok(()) => self
                        .prompter
                        .message(&format!("Search {id} copied to the clipboard."))?,
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard copy failed");
                        self.prompter.message(&format!("Copy failed: {err:#}"))?;
                    }
                }
                Ok(Flow::Stay)
            }
            "Edit Tags" => {
                let Some(input) = self.prompter.read_line(TAGS_PROMPT)? else {
                    return Ok(Flow::Quit);
                };
                self.store.update_tags(id, &TagList::parse_input(&input))?;
                self.show_updated(id)
            }
            "Edit SPL" => {
                self.prompter.message("Enter SPL Below (ENTER to Cancel)")?;
                let Some(spl) = self.read_block()? else {
                    return Ok(Flow::Quit);
                };
                if spl.trim().is_empty() {
                    self.prompter.message(CANCELED)?;
                    return Ok(Flow::Stay);
                }
                self.store.update_spl(id, &spl)?;
                self.show_updated(id)
            }
            "Edit Notes" => {
                self.prompter.message("Enter Notes Below (ENTER for None)")?;
                let Some(notes) = self.read_block()? else {
                    return Ok(Flow::Quit);
                };
                self.store.update_notes(id, &notes)?;
                self.show_updated(id)
            }
            "Delete" => {
                self.store.delete(id)?;
                self.prompter.message(&format!("Search {id} deleted."))?;
                Ok(Flow::Stay)
            }
            "Go Back" => Ok(Flow::Back),
            _ => Ok(Flow::Quit),
        }
    }

    fn show_updated(&mut self, id: SearchId) -> Result<Flow> {
        match self.store.get_by_id(id)? {
            Some(updated) => {
                self.prompter.message("Updated Search")?;
                self.prompter
                    .show_results(&SearchMap::from([(id, updated)]))?;
            }
            None => self.prompter.message(NO_RESULTS)?,
        }
        Ok(Flow::Stay)
    }

    // ===========================================
    // Database Management
    // ===========================================

    fn database_menu(&mut self) -> Result<Flow> {
        loop {
            let Some(choice) = self.pick("Database Management", &DATABASE_CHOICES)? else {
                return Ok(Flow::Quit);
            };
            let flow = match DATABASE_CHOICES[choice] {
                "Export Database" => self.export()?,
                "Reset Database" => self.reset()?,
                "Go Back" => return Ok(Flow::Back),
                _ => return Ok(Flow::Quit),
            };
            if self.settle(flow)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn export(&mut self) -> Result<Flow> {
        let Some(answer) = self
            .prompter
            .read_line("Export to file (ENTER to Cancel): ")?
        else {
            return Ok(Flow::Quit);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            self.prompter.message(CANCELED)?;
            return Ok(Flow::Stay);
        }

        let path = PathBuf::from(answer);
        let document = export_document(&*self.store)?;
        match write_export_file(&path, &document) {
            Ok(()) => self.prompter.message(&format!(
                "Exported {} search(es) to {}",
                document.count,
                path.display()
            ))?,
            Err(err) => self.prompter.message(&format!("Export failed: {err:#}"))?,
        }
        Ok(Flow::Stay)
    }

    fn reset(&mut self) -> Result<Flow> {
        let Some(answer) = self
            .prompter
            .read_line("Delete every search? (y/N): ")?
        else {
            return Ok(Flow::Quit);
        };
        if !answer.trim().eq_ignore_ascii_case("y") {
            self.prompter.message(CANCELED)?;
            return Ok(Flow::Stay);
        }

        self.store.reset().context("failed to reset database")?;
        self.prompter.message("Database has been reset.")?;
        Ok(Flow::Stay)
    }

    // ===========================================
    // Input helpers
    // ===========================================

    /// Shows a title and numbered choices, returning the index picked.
    fn pick(&mut self, title: &str, choices: &[&str]) -> Result<Option<usize>> {
        self.prompter.message("")?;
        self.prompter.message(title)?;
        Ok(choose(&mut *self.prompter, choices)?)
    }

    /// Pauses after a finished action. `Back` skips the pause.
    fn settle(&mut self, flow: Flow) -> Result<Flow> {
        match flow {
            Flow::Stay => match self.prompter.read_line("\nPress Enter to Continue...")? {
                Some(_) => Ok(Flow::Stay),
                None => Ok(Flow::Quit),
            },
            other => Ok(other),
        }
    }

    /// Reads lines until an empty one. Returns `None` if input ends first.
    ///
    /// Lines holding only whitespace belong to the block.
    fn read_block(&mut self) -> Result<Option<String>> {
        let mut lines = Vec::new();
        loop {
            match self.prompter.read_line("")? {
                None => return Ok(None),
                Some(line) if line.is_empty() => break,
                Some(line) => lines.push(line),
            }
        }
        Ok(Some(lines.join("\n")))
    }
}

//! Interactive create and edit flows.

use super::{display, print_notices};
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use registrar_client::StudentApi;
use registrar_form::{ConfirmOutcome, CountryDirectory, DraftField, StudentField, StudentScreen};
use registrar_models::{Gender, Nationality, Relation, UNSELECTED_NATIONALITY};
use std::fmt;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyAction {
    Add,
    Edit,
    Remove,
    Done,
}

impl fmt::Display for FamilyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FamilyAction::Add => "Add family member",
            FamilyAction::Edit => "Edit family member",
            FamilyAction::Remove => "Remove family member",
            FamilyAction::Done => "Done",
        })
    }
}

/// Walk the open form through its fields and family roster, then confirm.
pub async fn edit_session<A: StudentApi>(screen: &mut StudentScreen<A>) -> Result<()> {
    loop {
        prompt_student_fields(screen)?;
        edit_family(screen).await?;

        let save = Confirm::new()
            .with_prompt("Save student?")
            .default(true)
            .interact()?;
        if !save {
            screen.close_form();
            println!("Discarded.");
            return Ok(());
        }

        let outcome = screen.confirm().await;
        print_notices(screen.take_notices());
        match outcome {
            ConfirmOutcome::Created(id) => println!("Created student {id}"),
            ConfirmOutcome::Updated(id) => println!("Updated student {id}"),
            ConfirmOutcome::PartiallyUpdated { .. } if !screen.form().is_open() => {}
            ConfirmOutcome::PartiallyUpdated { .. }
            | ConfirmOutcome::Rejected(_)
            | ConfirmOutcome::Failed(_) => {
                let retry = Confirm::new()
                    .with_prompt("Edit and try again?")
                    .default(true)
                    .interact()?;
                if retry {
                    continue;
                }
                screen.close_form();
            }
        }
        return Ok(());
    }
}

fn prompt_student_fields<A: StudentApi>(screen: &mut StudentScreen<A>) -> Result<()> {
    let draft = screen.form().draft().clone();

    let first_name: String = Input::new()
        .with_prompt("First name")
        .with_initial_text(draft.first_name)
        .allow_empty(true)
        .interact_text()?;
    screen.set_field(StudentField::FirstName, &first_name);

    let last_name: String = Input::new()
        .with_prompt("Last name")
        .with_initial_text(draft.last_name)
        .allow_empty(true)
        .interact_text()?;
    screen.set_field(StudentField::LastName, &last_name);

    let genders: Vec<String> = Gender::iter().map(|g| g.to_string()).collect();
    let current = draft
        .gender
        .and_then(|g| Gender::iter().position(|option| option == g))
        .unwrap_or(0);
    let gender = Select::new()
        .with_prompt("Gender")
        .items(&genders)
        .default(current)
        .interact()?;
    screen.set_field(StudentField::Gender, &genders[gender]);

    let mut initial = draft
        .date_of_birth
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    loop {
        let date_of_birth: String = Input::new()
            .with_prompt("Date of birth (YYYY-MM-DD or DD/MM/YYYY)")
            .with_initial_text(initial.clone())
            .allow_empty(true)
            .interact_text()?;
        if screen.set_field(StudentField::DateOfBirth, &date_of_birth) {
            break;
        }
        print_notices(screen.take_notices());
        initial = date_of_birth;
    }

    let nationality = select_nationality(screen.countries(), &draft.nationality)?;
    screen.set_field(StudentField::Nationality, &nationality);

    print_notices(screen.take_notices());
    Ok(())
}

/// Returns the raw selector value: a country id or the placeholder.
fn select_nationality(countries: &CountryDirectory, current: &Nationality) -> Result<String> {
    let mut items = vec![UNSELECTED_NATIONALITY.to_string()];
    items.extend(countries.all().iter().map(|c| c.name.clone()));

    let default = current
        .country_id()
        .and_then(|id| countries.all().iter().position(|c| &c.id == id))
        .map_or(0, |index| index + 1);

    let choice = Select::new()
        .with_prompt("Nationality")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(match choice {
        0 => UNSELECTED_NATIONALITY.to_string(),
        index => countries.all()[index - 1].id.to_string(),
    })
}

async fn edit_family<A: StudentApi>(screen: &mut StudentScreen<A>) -> Result<()> {
    loop {
        let roster = screen.form().family().roster();
        display::print_roster(roster, screen.countries());

        let mut actions = vec![FamilyAction::Add];
        if !roster.is_empty() {
            actions.extend([FamilyAction::Edit, FamilyAction::Remove]);
        }
        actions.push(FamilyAction::Done);

        let choice = Select::new()
            .with_prompt("Family members")
            .items(&actions)
            .default(actions.len() - 1)
            .interact()?;

        match actions[choice] {
            FamilyAction::Add => {
                if screen.open_family_draft() {
                    fill_family_draft(screen)?;
                }
            }
            FamilyAction::Edit => {
                let index = pick_row(screen)?;
                if screen.select_family_member(index) {
                    fill_family_draft(screen)?;
                }
            }
            FamilyAction::Remove => {
                let index = pick_row(screen)?;
                screen.remove_family_member(index).await;
            }
            FamilyAction::Done => return Ok(()),
        }
        print_notices(screen.take_notices());
    }
}

fn pick_row<A: StudentApi>(screen: &StudentScreen<A>) -> Result<usize> {
    let rows: Vec<String> = screen
        .form()
        .family()
        .roster()
        .iter()
        .enumerate()
        .map(|(index, member)| format!("{}. {} ({})", index + 1, member.name, member.relation))
        .collect();
    Ok(Select::new()
        .with_prompt("Which family member?")
        .items(&rows)
        .default(0)
        .interact()?)
}

fn fill_family_draft<A: StudentApi>(screen: &mut StudentScreen<A>) -> Result<()> {
    loop {
        let draft = screen.form().family().draft().clone();

        let name: String = Input::new()
            .with_prompt("Name")
            .with_initial_text(draft.name())
            .allow_empty(true)
            .interact_text()?;
        screen.set_family_field(DraftField::Name, &name);

        let relations: Vec<String> = Relation::iter().map(|r| r.to_string()).collect();
        let current = draft
            .relation()
            .and_then(|r| Relation::iter().position(|option| option == r))
            .unwrap_or(0);
        let relation = Select::new()
            .with_prompt("Relation")
            .items(&relations)
            .default(current)
            .interact()?;
        screen.set_family_field(DraftField::Relation, &relations[relation]);

        let nationality = select_nationality(screen.countries(), draft.nationality())?;
        screen.set_family_field(DraftField::Nationality, &nationality);

        if screen.submit_family_draft().is_some() {
            return Ok(());
        }
        print_notices(screen.take_notices());

        let retry = Confirm::new()
            .with_prompt("Fix this family member?")
            .default(true)
            .interact()?;
        if !retry {
            screen.cancel_family_draft();
            return Ok(());
        }
    }
}

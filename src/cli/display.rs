use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use registrar_form::{CountryDirectory, Roster, StudentForm, StudentTable};
use registrar_models::Country;
use registrar_models::students::DATE_DISPLAY_FORMAT;

fn table_with_header(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn print_students(page: &StudentTable) {
    if page.rows.is_empty() {
        println!("No students found.");
        return;
    }

    let mut table = table_with_header(&[
        "Id",
        "First name",
        "Last name",
        "Gender",
        "Date of birth",
        "Nationality",
        "Status",
    ]);
    for row in &page.rows {
        table.add_row(vec![
            row.id.to_string(),
            row.first_name.clone(),
            row.last_name.clone(),
            row.gender.clone(),
            row.date_of_birth.clone(),
            row.nationality.clone(),
            row.status.clone(),
        ]);
    }

    println!("{table}");
    println!(
        "\nPage {} of {} ({} students, {} per page)",
        page.meta.page, page.meta.total_pages, page.meta.total, page.meta.per_page
    );
    if page.actions.delete || page.actions.change_status {
        println!("Row actions: edit, delete, accept, reject");
    }
}

pub fn print_countries(countries: &[Country]) {
    if countries.is_empty() {
        println!("No countries found.");
        return;
    }
    let mut table = table_with_header(&["Id", "Country"]);
    for country in countries {
        table.add_row(vec![country.id.to_string(), country.name.clone()]);
    }
    println!("{table}");
}

pub fn print_roster(roster: &Roster, countries: &CountryDirectory) {
    if roster.is_empty() {
        println!("No family members.");
        return;
    }
    let mut table = table_with_header(&["#", "Name", "Relation", "Nationality", "Saved"]);
    for (index, member) in roster.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            member.name.clone(),
            member.relation.to_string(),
            countries.name_of(&member.nationality).to_string(),
            if member.is_persisted() { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn print_student(form: &StudentForm, countries: &CountryDirectory) {
    let draft = form.draft();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let rows = [
        (
            "Id",
            draft.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        ),
        ("First name", draft.first_name.clone()),
        ("Last name", draft.last_name.clone()),
        (
            "Gender",
            draft.gender.map(|g| g.to_string()).unwrap_or_default(),
        ),
        (
            "Date of birth",
            draft
                .date_of_birth
                .map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
                .unwrap_or_default(),
        ),
        (
            "Nationality",
            countries.name_of(&draft.nationality).to_string(),
        ),
        ("Status", draft.status.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    println!("{table}");
    print_roster(form.family().roster(), countries);
}

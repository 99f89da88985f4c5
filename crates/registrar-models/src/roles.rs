//! Client-side roles.
//!
//! A role only decides which controls the screen offers. It is a UI
//! affordance, not access control: the backend must authorize every call
//! on its own.

use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[default]
    #[strum(serialize = "user", to_string = "User")]
    User,
    #[strum(
        serialize = "staff",
        serialize = "admin-staff",
        serialize = "admin staff",
        to_string = "Admin Staff"
    )]
    AdminStaff,
    #[strum(serialize = "registrar", to_string = "Registrar")]
    Registrar,
}

impl Role {
    /// May open the create form.
    pub fn can_create(&self) -> bool {
        matches!(self, Role::AdminStaff | Role::Registrar)
    }

    /// May change a record the backend already holds.
    pub fn can_edit_existing(&self) -> bool {
        matches!(self, Role::Registrar)
    }

    /// May mutate the draft, given whether it is already persisted.
    pub fn can_edit(&self, persisted: bool) -> bool {
        if persisted {
            self.can_edit_existing()
        } else {
            self.can_create()
        }
    }

    /// May delete students and accept or reject them.
    pub fn can_manage_records(&self) -> bool {
        matches!(self, Role::Registrar)
    }
}

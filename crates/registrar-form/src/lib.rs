//! # Registrar Form
//!
//! The student registration workflow: a student draft with an embedded,
//! ordered roster of family members, and the controller that persists it.
//!
//! # Modules
//!
//! - [`reference`]: Country directory for nationality selectors
//! - [`draft`]: The single in-progress family member
//! - [`roster`]: Ordered family members of the open student
//! - [`family`]: Roster, draft editor, row selection and view state
//! - [`student`]: The student draft form state machine
//! - [`controller`]: Create and update call sequences
//! - [`screen`]: Driver that runs the form against a [`StudentApi`](registrar_client::StudentApi)
//!
//! # Example
//!
//! ```ignore
//! use registrar_form::{StudentField, StudentScreen};
//!
//! let mut screen = StudentScreen::new(api, ScreenConfig::from_env(), Role::Registrar);
//! screen.activate().await;
//! screen.open_create();
//! screen.set_field(StudentField::FirstName, "Ana");
//! let outcome = screen.confirm().await;
//! ```

pub mod controller;
pub mod draft;
pub mod error;
pub mod family;
pub mod reference;
pub mod roster;
pub mod screen;
pub mod student;

pub use controller::{MemberFailure, SubmissionController, SubmitOutcome};
pub use draft::{DraftField, FamilyMemberDraft};
pub use error::FormError;
pub use family::{DraftOutcome, FamilySection, FamilyView};
pub use reference::CountryDirectory;
pub use roster::Roster;
pub use screen::{ConfirmOutcome, RowActions, StudentRow, StudentScreen, StudentTable};
pub use student::{RemovalPlan, SessionTicket, StudentDraft, StudentField, StudentForm, SubmitPlan};

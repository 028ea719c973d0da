mod employee;
mod income_tax_bracket;
mod invoice;
mod payroll;
mod tax_parameters;

pub use employee::{EducationLevel, EmployeeProfile, ExemptionProfile, GraduationField, PersonnelType};
pub use income_tax_bracket::{IncomeTaxBracket, default_income_tax_brackets};
pub use invoice::{InvoiceDocumentResult, InvoiceLineInput, InvoiceLineResult};
pub use payroll::{PayrollEntryResult, PeriodSummary};
pub use tax_parameters::{ExemptionRates, TaxParameters, default_exemption_rates};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod doctor;
pub use doctor::DoctorWorkspace;

mod patient;
pub use patient::PatientWorkspace;

mod lookup;
pub use lookup::Lookup;

mod patient_registration;
pub use patient_registration::PatientRegistration;

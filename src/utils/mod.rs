pub mod get_record_id;
pub mod key_gen;
pub mod time;
pub mod validated_form;
pub mod validator;

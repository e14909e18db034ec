pub mod excel;
pub mod io;
pub mod transforms;
pub mod types;
pub mod validation;

pub use io::{load_df, output_extension, save_df};
pub use transforms::{
    apply_null_action, apply_primary_key, apply_remove_duplicates, clean_df, clean_df_lazy,
};
pub use types::{CleaningConfig, NullAction, PRIMARY_KEY_COLUMN};
pub use validation::{ExtensionPolicy, extension_of};

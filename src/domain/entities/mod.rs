mod domain_record;
mod stored_file;
mod upload;

pub use domain_record::{file_stem, DomainRecord, NewDomain};
pub use stored_file::StoredFile;
pub use upload::{
    image_storage_name, mapper_storage_name, FileRole, UploadPolicy, UploadedFile,
};

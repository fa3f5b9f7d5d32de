pub mod core {
    pub mod domain;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod file;
    pub mod logs;
    pub mod text;
}

pub mod books {
    pub mod domain;
    pub mod factory;
}

pub mod members;
pub mod loans;

pub mod catalog {
    pub mod domain;
    pub mod factory;
}

//! Reading views: focus word, guided excerpt and the playback footer.

pub mod view;

//! 网络输入模块
//!
//! 内置示例、随机生成和文件导入

pub mod generator;
pub mod loader;
pub mod presets;

pub use generator::RandomNetwork;
pub use loader::{load_matrix, read_matrix, MatrixFormat};
pub use presets::{classic_example, second_example, Preset};

//! # RustMCF — 最小费用流引擎
//!
//! 连续最短增广路 + 顶点势函数的最小费用流求解器，附带独立的验证面：
//! 对偶最优性证书、流守恒审计、SPFA 参考解算器与随机实例生成。
//!
//! 模块一览：
//!
//! * [`net`] — 残量网络、强类型标识、DIMACS/JSON/RON I/O；
//! * [`solver`] — 势函数维护与 [`MinCostFlow`] 控制器；
//! * [`analysis`] — 证书、审计、参考解算器与实例生成；
//! * [`numeric`] — 容量与费用标量的 trait 约束。
#![warn(non_snake_case)]

pub mod analysis;
pub mod net;
pub mod numeric;
pub mod solver;

pub use net::{FlowNetwork, VertexId};
pub use numeric::{Capacity, Cost};
pub use solver::MinCostFlow;

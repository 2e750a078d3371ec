//! # 解的验证与检验工具
//!
//! 求解器之外的独立检验面：
//!
//! * [`certificate`] — LP 对偶最优性证书与顶点守恒审计；
//! * [`reference`] — 基于 SPFA 增广的独立参考解算器（暴力对照）；
//! * [`generator`] — 可复现的随机实例生成；
//! * [`solution`] — 承载流量的弧构成的 petgraph 视图与 dot 导出。

pub mod certificate;
pub mod generator;
pub mod reference;
pub mod solution;

pub use certificate::{
    CertificateError, ConservationError, OptimalityCertificate, approx_eq, audit_conservation,
    certificate,
};
pub use generator::{GeneratorConfig, Instance, NetworkGenerator};
pub use reference::min_cost_max_flow_spfa;
pub use solution::{solution_dot, solution_graph};

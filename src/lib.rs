//! CodeMentor - 面向程序设计课程的 AI 辅助评测服务
//!
//! 学生小组上传代码压缩包和讲解视频，服务调用本地大模型给出四项维度评分与反馈，
//! 用代码向量做作业内查重，并转写视频分析组员参与度。教师复核后发布成绩。
//!
//! # 架构
//! - `blob`: 对象存储（S3 兼容 / 本地目录）
//! - `cache`: 缓存层（Moka/Redis），保存代码向量
//! - `clients`: 大模型、向量模型与语音转写客户端
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `evaluation`: 评测流水线
//! - `middlewares`: 限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod blob;
pub mod cache;
pub mod clients;
pub mod config;
pub mod entity;
pub mod errors;
pub mod evaluation;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::catalog;
use crate::domain::{
    Chain, Finding, FindingType, PipelineMetadata, PipelineStage, Service, ServiceFindings,
    Severity, Stage, StageDetails, VulnerablePackage,
};
use crate::engine::ids;
use crate::error::{ChainsmithError, Result};

const PIPELINE_NAME: &str = "Code to Cloud Pipeline";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Master seed; `None` draws from entropy. Each service consumes a
    /// child seed derived from this and its name, so services can be
    /// generated in parallel without sharing a random source.
    pub seed: Option<u64>,
    pub chains_min: u32,
    pub chains_max: u32,
    pub standalone_min: u32,
    pub standalone_max: u32,
    pub runtime_probability: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            chains_min: 1,
            chains_max: 3,
            standalone_min: 2,
            standalone_max: 5,
            runtime_probability: 0.5,
        }
    }
}

impl GenerateOptions {
    fn normalized(mut self) -> Self {
        if self.chains_max < self.chains_min {
            self.chains_max = self.chains_min;
        }
        if self.standalone_max < self.standalone_min {
            self.standalone_max = self.standalone_min;
        }
        self.runtime_probability = self.runtime_probability.clamp(0.0, 1.0);
        self
    }
}

/// One chain together with the findings it links.
#[derive(Debug, Clone)]
pub struct GeneratedChain {
    pub chain: Chain,
    pub findings: Vec<Finding>,
}

/// Produces linked finding chains and standalone findings for one service.
///
/// Identifiers are hash-derived from their inputs and do not depend on
/// draw order; severity, type, and description selections consume the
/// injected random source, so a seeded generator replays them exactly.
pub struct ChainGenerator {
    rng: StdRng,
    options: GenerateOptions,
}

impl ChainGenerator {
    #[must_use]
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            options: options.normalized(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64, options: GenerateOptions) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            options: options.normalized(),
        }
    }

    /// Generator for one service, child-seeded from the master seed when
    /// one is set.
    #[must_use]
    pub fn for_service(options: &GenerateOptions, service_name: &str) -> Self {
        match options.seed {
            Some(seed) => Self::seeded(service_seed(seed, service_name), options.clone()),
            None => Self::new(options.clone()),
        }
    }

    /// Generate one chain anchored at a file selected uniformly at random.
    pub fn generate_chain(&mut self, service: &Service) -> Result<GeneratedChain> {
        if service.files.is_empty() {
            return Err(ChainsmithError::EmptyService {
                service: service.name.clone(),
            });
        }
        let file = pick(&mut self.rng, &service.files).clone();
        Ok(self.generate_chain_for_file(service, &file))
    }

    /// Generate one chain anchored at `file`. The chain id and image sha
    /// are pure functions of `(service.name, file)` and
    /// `(service.image, chain_id)` respectively.
    pub fn generate_chain_for_file(&mut self, service: &Service, file: &str) -> GeneratedChain {
        let chain_id = ids::chain_id(&service.name, file);
        let file_sha = ids::file_commit_sha(file);
        let image_sha = ids::image_sha(&service.image, &chain_id);
        let package = pick_package(&mut self.rng);

        let code_kind = *pick(&mut self.rng, &FindingType::CODE);
        let code_id = ids::chain_finding_id(code_kind.slug(), &service.name, &chain_id);
        let build_id =
            ids::chain_finding_id(FindingType::ImageScan.slug(), &service.name, &chain_id);

        let runtime_id = if self.rng.gen_bool(self.options.runtime_probability) {
            let kind = *pick(&mut self.rng, &FindingType::RUNTIME);
            Some((
                kind,
                ids::chain_finding_id(kind.slug(), &service.name, &chain_id),
            ))
        } else {
            None
        };

        // All ids are known up front, so every edge list is written once.
        let mut code = self.chain_finding(code_kind, code_id.clone(), &chain_id);
        code.file = Some(file.to_string());
        code.file_commit_sha = Some(file_sha);
        code.line = Some(self.rng.gen_range(10..=500));
        code.connected_to = vec![build_id.clone()];
        code.vulnerable_package = Some(package.clone());

        let mut build = self.chain_finding(FindingType::ImageScan, build_id.clone(), &chain_id);
        build.image = Some(service.image.clone());
        build.image_sha = Some(image_sha.clone());
        build.build_commit_sha = Some(chain_id.clone());
        build.connected_to = match &runtime_id {
            Some((_, id)) => vec![code_id.clone(), id.clone()],
            None => vec![code_id.clone()],
        };
        build.vulnerable_package = Some(package.clone());

        let runtime = runtime_id.as_ref().map(|(kind, id)| {
            let mut finding = self.chain_finding(*kind, id.clone(), &chain_id);
            finding.image = Some(service.image.clone());
            finding.image_sha = Some(image_sha.clone());
            finding.pod_name = Some(format!(
                "{}-pod-{}",
                service.name,
                self.rng.gen_range(1000..=9999)
            ));
            finding.deployment_commit_sha = Some(chain_id.clone());
            finding.connected_to = vec![build_id.clone()];
            finding.vulnerable_package = Some(package);
            finding
        });

        let chain = self.assemble_chain(
            service,
            file,
            &chain_id,
            &image_sha,
            &code_id,
            &build_id,
            runtime_id.as_ref().map(|(_, id)| id.as_str()),
        );

        let mut findings = vec![code, build];
        findings.extend(runtime);
        GeneratedChain { chain, findings }
    }

    /// One finding not linked to any chain.
    pub fn generate_standalone(
        &mut self,
        service: &Service,
        stage: Stage,
        index: usize,
    ) -> Result<Finding> {
        let commit = ids::commit_sha(&format!(
            "standalone:{}:{}:{}",
            service.name,
            stage.as_str(),
            index
        ));

        let kind = match stage {
            Stage::Code => *pick(&mut self.rng, &FindingType::CODE),
            Stage::Build => FindingType::ImageScan,
            Stage::Runtime => *pick(&mut self.rng, &FindingType::RUNTIME),
        };

        let mut finding = Finding {
            id: ids::standalone_finding_id(kind.slug(), &service.name, index),
            chain_id: None,
            stage,
            kind,
            severity: *pick(&mut self.rng, &Severity::ALL),
            source: kind.source().to_string(),
            description: (*pick(&mut self.rng, catalog::descriptions(kind))).to_string(),
            owner: (*pick(&mut self.rng, &catalog::OWNERS)).to_string(),
            commit_sha: commit.clone(),
            file: None,
            file_commit_sha: None,
            line: None,
            image: None,
            image_sha: None,
            build_commit_sha: None,
            pod_name: None,
            deployment_commit_sha: None,
            connected_to: Vec::new(),
            vulnerable_package: None,
        };

        match stage {
            Stage::Code => {
                if service.files.is_empty() {
                    return Err(ChainsmithError::EmptyService {
                        service: service.name.clone(),
                    });
                }
                let file = pick(&mut self.rng, &service.files).clone();
                finding.file_commit_sha = Some(ids::file_commit_sha(&file));
                finding.file = Some(file);
                finding.line = Some(self.rng.gen_range(10..=500));
            }
            Stage::Build => {
                finding.image = Some(service.image.clone());
                finding.image_sha =
                    Some(ids::hex_digest(&format!("{}-standalone-{index}", service.image)));
                finding.build_commit_sha = Some(commit);
            }
            Stage::Runtime => {
                finding.image = Some(service.image.clone());
                finding.image_sha = Some(ids::image_sha(&service.image, &commit));
                finding.pod_name = Some(format!(
                    "{}-pod-{}",
                    service.name,
                    self.rng.gen_range(1000..=9999)
                ));
                finding.deployment_commit_sha = Some(commit);
            }
        }

        Ok(finding)
    }

    /// Chains plus standalone findings for one service. Chain loci are
    /// sampled without replacement so chain ids cannot collide within a
    /// service; a service with fewer files than the rolled chain count
    /// yields one chain per file.
    pub fn generate_service(&mut self, service: &Service) -> Result<ServiceFindings> {
        if service.files.is_empty() {
            return Err(ChainsmithError::EmptyService {
                service: service.name.clone(),
            });
        }

        let image_sha = ids::hex_digest(&format!(
            "{}-{}",
            service.image,
            self.rng.gen_range(1000..=9999)
        ));

        let chain_count = self
            .rng
            .gen_range(self.options.chains_min..=self.options.chains_max)
            as usize;
        let loci: Vec<String> = service
            .files
            .choose_multiple(&mut self.rng, chain_count)
            .cloned()
            .collect();

        let mut findings = Vec::new();
        let mut chains = Vec::new();
        for file in &loci {
            let generated = self.generate_chain_for_file(service, file);
            findings.extend(generated.findings);
            chains.push(generated.chain);
        }

        let standalone_count = self
            .rng
            .gen_range(self.options.standalone_min..=self.options.standalone_max)
            as usize;
        for index in 0..standalone_count {
            let stage = *pick(&mut self.rng, &Stage::ALL);
            findings.push(self.generate_standalone(service, stage, index)?);
        }

        Ok(ServiceFindings {
            name: service.name.clone(),
            language: service.language.clone(),
            image: service.image.clone(),
            image_sha,
            findings_count: findings.len(),
            findings,
            connected_findings: chains,
        })
    }

    fn chain_finding(&mut self, kind: FindingType, id: String, chain_id: &str) -> Finding {
        Finding {
            id,
            chain_id: Some(chain_id.to_string()),
            stage: kind.stage(),
            kind,
            severity: *pick(&mut self.rng, &Severity::CHAIN),
            source: kind.source().to_string(),
            description: (*pick(&mut self.rng, catalog::descriptions(kind))).to_string(),
            owner: (*pick(&mut self.rng, &catalog::OWNERS)).to_string(),
            commit_sha: chain_id.to_string(),
            file: None,
            file_commit_sha: None,
            line: None,
            image: None,
            image_sha: None,
            build_commit_sha: None,
            pod_name: None,
            deployment_commit_sha: None,
            connected_to: Vec::new(),
            vulnerable_package: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble_chain(
        &mut self,
        service: &Service,
        file: &str,
        chain_id: &str,
        image_sha: &str,
        code_id: &str,
        build_id: &str,
        runtime_id: Option<&str>,
    ) -> Chain {
        let stage_commit = ids::commit_sha(&format!("{}:{file}:{image_sha}", service.name));
        let registry_name = format!("{}/{}", catalog::REGISTRY_PREFIX, service.name);

        let stages = vec![
            PipelineStage {
                id: "code".to_string(),
                name: file.to_string(),
                kind: "code".to_string(),
                status: "completed".to_string(),
                details: StageDetails {
                    file: Some(file.to_string()),
                    commit_sha: Some(stage_commit),
                    findings: vec![code_id.to_string()],
                    ..StageDetails::default()
                },
            },
            PipelineStage {
                id: "store".to_string(),
                name: registry_name.clone(),
                kind: "container_repository".to_string(),
                status: "completed".to_string(),
                details: StageDetails {
                    image: Some(service.image.clone()),
                    sha: Some(image_sha.to_string()),
                    findings: vec![build_id.to_string()],
                    ..StageDetails::default()
                },
            },
            PipelineStage {
                id: "cloud".to_string(),
                name: registry_name,
                kind: "container_image".to_string(),
                status: "active".to_string(),
                details: StageDetails {
                    image: Some(service.image.clone()),
                    sha: Some(image_sha.to_string()),
                    // Runtime absent means an explicit empty list here.
                    findings: runtime_id.map(str::to_string).into_iter().collect(),
                    ..StageDetails::default()
                },
            },
        ];

        let mut finding_ids = vec![code_id.to_string(), build_id.to_string()];
        finding_ids.extend(runtime_id.map(str::to_string));

        let end = Utc::now();
        let start = end - Duration::hours(self.rng.gen_range(1..=24));

        Chain {
            chain_id: chain_id.to_string(),
            commit_sha: chain_id.to_string(),
            name: PIPELINE_NAME.to_string(),
            status: "active".to_string(),
            stages,
            findings: finding_ids,
            metadata: PipelineMetadata {
                start_time: start.to_rfc3339(),
                end_time: end.to_rfc3339(),
                triggered_by: (*pick(&mut self.rng, &catalog::TRIGGERS)).to_string(),
                source_branch: "main".to_string(),
                target_branch: "main".to_string(),
            },
        }
    }
}

pub(crate) fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn pick_package(rng: &mut StdRng) -> VulnerablePackage {
    let (name, version, fixed_version) = *pick(rng, &catalog::VULNERABLE_PACKAGES);
    VulnerablePackage {
        name: name.to_string(),
        version: version.to_string(),
        fixed_version: fixed_version.to_string(),
    }
}

fn service_seed(master: u64, name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    master ^ u64::from_be_bytes(bytes)
}
